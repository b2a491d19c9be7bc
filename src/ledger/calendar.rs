//! Calendar grouping for the agenda view. Callers filter once, then group;
//! the groupings never re-apply a filter of their own.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use super::transaction::{Transaction, TransactionStatus};

/// ISO-8601 week key for a date, e.g. `2025-W29`. Weeks run Monday through
/// Sunday and week 1 contains the year's first Thursday, so the ISO year
/// can differ from the calendar year at the boundaries.
pub fn week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{:04}-W{:02}", week.year(), week.week())
}

/// Month key for a date, e.g. `2025-07`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

pub fn group_by_day(transactions: &[Transaction]) -> BTreeMap<NaiveDate, Vec<Transaction>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for txn in transactions {
        buckets.entry(txn.date).or_default().push(txn.clone());
    }
    buckets
}

pub fn group_by_week(transactions: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
    let mut buckets: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for txn in transactions {
        buckets.entry(week_key(txn.date)).or_default().push(txn.clone());
    }
    buckets
}

pub fn group_by_month(transactions: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
    let mut buckets: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for txn in transactions {
        buckets.entry(month_key(txn.date)).or_default().push(txn.clone());
    }
    buckets
}

/// Badge flags for one calendar day. Flags are independent; a day whose
/// transactions differ in status carries several at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayFlags {
    /// Any transaction that day is Pending or Overdue.
    pub has_open: bool,
    pub has_paid: bool,
    pub has_rejected: bool,
}

pub fn day_flags(transactions: &[Transaction]) -> BTreeMap<NaiveDate, DayFlags> {
    let mut flags: BTreeMap<NaiveDate, DayFlags> = BTreeMap::new();
    for txn in transactions {
        let entry = flags.entry(txn.date).or_default();
        match txn.status {
            TransactionStatus::Pending | TransactionStatus::Overdue => entry.has_open = true,
            TransactionStatus::Paid => entry.has_paid = true,
            TransactionStatus::Rejected => entry.has_rejected = true,
        }
    }
    flags
}
