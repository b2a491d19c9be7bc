use std::collections::BTreeSet;
use std::fs;

use chrono::NaiveDate;
use ledger_core::{
    clock::FixedClock,
    engine::LedgerEngine,
    ledger::{TransactionInput, TransactionKind, TransactionStatus},
    storage::{JsonStorage, Storage},
};
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_input(description: &str, day: NaiveDate) -> TransactionInput {
    TransactionInput {
        description: description.into(),
        amount_cents: 250,
        kind: TransactionKind::Expense,
        category: "Bills".into(),
        date: Some(day),
        tags: BTreeSet::new(),
        note: Some("imported".into()),
        recurrence: None,
    }
}

#[test]
fn ledger_survives_engine_reopen_from_disk() {
    let temp = tempdir().expect("temp dir");
    let clock = FixedClock(date(2025, 7, 20));

    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("storage");
    let mut engine = LedgerEngine::open(storage, clock).expect("open");
    let created = engine
        .add_transaction(sample_input("Electricity", date(2025, 7, 10)))
        .expect("add");
    engine.transactions().expect("recompute pass");

    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("storage again");
    let mut reopened = LedgerEngine::open(storage, clock).expect("reopen");
    let txns = reopened.transactions().expect("list");
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].id, created[0].id);
    assert_eq!(txns[0].status, TransactionStatus::Overdue);
    assert_eq!(txns[0].note.as_deref(), Some("imported"));
}

#[test]
fn blob_on_disk_is_plain_json() {
    let temp = tempdir().expect("temp dir");
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("storage");
    let mut engine =
        LedgerEngine::open(storage, FixedClock(date(2025, 7, 20))).expect("open");
    engine
        .add_transaction(sample_input("Electricity", date(2025, 7, 25)))
        .expect("add");

    let path = temp.path().join("transactions.json");
    let raw = fs::read_to_string(&path).expect("read blob");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
    let txns = value
        .get("transactions")
        .and_then(|v| v.as_array())
        .expect("transactions array");
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0]["amount_cents"], -250);
}

#[test]
fn overwrites_keep_backups_within_retention() {
    let temp = tempdir().expect("temp dir");
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).expect("storage");
    let mut engine =
        LedgerEngine::open(storage.clone(), FixedClock(date(2025, 7, 20))).expect("open");

    for day in 1..=4 {
        engine
            .add_transaction(sample_input("Entry", date(2025, 7, day)))
            .expect("add");
    }

    let backups = storage.list_backups("transactions").expect("list backups");
    assert!(!backups.is_empty(), "overwrites must leave backups");
    assert!(backups.len() <= 2, "retention of 2 exceeded: {backups:?}");
}

#[test]
fn seeded_engine_persists_its_seed() {
    let temp = tempdir().expect("temp dir");
    let clock = FixedClock(date(2025, 7, 20));

    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("storage");
    let mut seeded = LedgerEngine::open_or_seed(storage, clock).expect("open seeded");
    let seeded_count = seeded.transactions().expect("list").len();
    assert!(seeded_count > 0);
    // First persisted write happens on the first mutation.
    seeded
        .add_transaction(sample_input("Extra", date(2025, 7, 21)))
        .expect("add");

    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("storage again");
    let mut reopened = LedgerEngine::open(storage, clock).expect("reopen plain");
    assert_eq!(reopened.transactions().expect("list").len(), seeded_count + 1);
}

#[test]
fn load_propagates_malformed_blob_errors() {
    let temp = tempdir().expect("temp dir");
    let path = temp.path().join("transactions.json");
    fs::write(&path, "{ not json").expect("write garbage");

    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).expect("storage");
    assert!(storage.load("transactions").is_err());
    assert!(LedgerEngine::open(storage, FixedClock(date(2025, 7, 20))).is_err());
}
