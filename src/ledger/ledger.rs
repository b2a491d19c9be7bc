use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

use super::transaction::{Recurrence, Transaction, TransactionKind, TransactionStatus};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Persisted envelope around the transaction collection. Serialized as a
/// single JSON blob under one storage key; every mutation rewrites the
/// whole envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Input for a new entry. The amount arrives as an unsigned magnitude; the
/// stored sign is derived from `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    pub description: String,
    pub amount_cents: i64,
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
}

/// Partial update for an existing entry. Absent fields are left alone;
/// `amount_cents` carries an unsigned magnitude and the stored sign is
/// re-derived from the effective kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub description: Option<String>,
    pub amount_cents: Option<i64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub tags: Option<BTreeSet<String>>,
    /// Outer `Some` touches the note; `Some(None)` clears it.
    pub note: Option<Option<String>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            updated_at: Utc::now(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    /// Validates `input`, expands installment recurrences, and appends the
    /// resulting entries. Returns the ids of everything created, in date
    /// order. `today` is the default date for inputs that omit one.
    pub fn add(&mut self, input: TransactionInput, today: NaiveDate) -> Result<Vec<Uuid>> {
        validate_description(&input.description)?;
        validate_magnitude(input.amount_cents)?;
        let base_date = input.date.unwrap_or(today);

        let created = match input.recurrence.clone() {
            Some(Recurrence::Installments { count, period }) => {
                if count == 0 {
                    return Err(LedgerError::Validation(
                        "installment count must be at least 1".into(),
                    ));
                }
                // Every share must stay at least one cent so the sign
                // invariant holds for each generated entry.
                if count as i64 > input.amount_cents {
                    return Err(LedgerError::Validation(
                        "installment count exceeds the amount in cents".into(),
                    ));
                }
                let shares = split_installments(input.amount_cents, count);
                shares
                    .into_iter()
                    .enumerate()
                    .map(|(index, share)| {
                        let mut txn = Transaction::new(
                            installment_label(&input.description, index as u32 + 1, count),
                            share,
                            input.kind,
                            input.category.clone(),
                            period.offset(base_date, index as u32),
                        );
                        txn.tags = input.tags.clone();
                        txn.note = input.note.clone();
                        txn.recurrence = Some(Recurrence::Installments { count, period });
                        txn
                    })
                    .collect::<Vec<_>>()
            }
            other => {
                let mut txn = Transaction::new(
                    input.description.clone(),
                    input.amount_cents,
                    input.kind,
                    input.category.clone(),
                    base_date,
                );
                txn.tags = input.tags;
                txn.note = input.note;
                txn.recurrence = other;
                vec![txn]
            }
        };

        let ids = created.iter().map(|txn| txn.id).collect();
        self.transactions.extend(created);
        self.touch();
        Ok(ids)
    }

    /// Applies `patch` to the transaction identified by `id`. The amount
    /// sign is re-normalized whenever the magnitude or the kind changes.
    pub fn edit(&mut self, id: Uuid, patch: TransactionPatch) -> Result<Transaction> {
        if let Some(description) = &patch.description {
            validate_description(description)?;
        }
        if let Some(magnitude) = patch.amount_cents {
            validate_magnitude(magnitude)?;
        }
        let txn = self
            .transaction_mut(id)
            .ok_or(LedgerError::NotFound(id))?;

        if let Some(description) = patch.description {
            txn.description = description;
        }
        if let Some(kind) = patch.kind {
            txn.kind = kind;
        }
        if let Some(magnitude) = patch.amount_cents {
            txn.amount_cents = txn.kind.signed(magnitude);
        } else if patch.kind.is_some() {
            txn.amount_cents = txn.kind.signed(txn.amount_cents.abs());
        }
        if let Some(category) = patch.category {
            txn.category = category;
        }
        if let Some(date) = patch.date {
            txn.date = date;
        }
        if let Some(tags) = patch.tags {
            txn.tags = tags;
        }
        if let Some(note) = patch.note {
            txn.note = note;
        }
        let updated = txn.clone();
        self.touch();
        Ok(updated)
    }

    /// Removes and returns the transaction identified by `id`.
    pub fn remove(&mut self, id: Uuid) -> Result<Transaction> {
        let index = self
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        let removed = self.transactions.remove(index);
        self.touch();
        Ok(removed)
    }

    /// Sets a status directly. Every manual transition is legal; the type
    /// rules out anything outside the four states.
    pub fn set_status(&mut self, id: Uuid, status: TransactionStatus) -> Result<Transaction> {
        let txn = self
            .transaction_mut(id)
            .ok_or(LedgerError::NotFound(id))?;
        txn.status = status;
        let updated = txn.clone();
        self.touch();
        Ok(updated)
    }

    /// "Approve payment" toggle on one entry.
    pub fn approve(&mut self, id: Uuid) -> Result<Transaction> {
        let txn = self
            .transaction_mut(id)
            .ok_or(LedgerError::NotFound(id))?;
        txn.approve();
        let updated = txn.clone();
        self.touch();
        Ok(updated)
    }

    /// "Reject payment" toggle on one entry.
    pub fn reject(&mut self, id: Uuid) -> Result<Transaction> {
        let txn = self
            .transaction_mut(id)
            .ok_or(LedgerError::NotFound(id))?;
        txn.reject();
        let updated = txn.clone();
        self.touch();
        Ok(updated)
    }

    /// Sorted distinct category labels. Categories are an open vocabulary
    /// suggested to the UI, not a separate owned entity.
    pub fn known_categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .transactions
            .iter()
            .map(|txn| txn.category.as_str())
            .filter(|category| !category.is_empty())
            .collect();
        set.into_iter().map(str::to_owned).collect()
    }

    /// Small starter set used when the storage key has never been written
    /// and the caller opts into seeding.
    pub fn example(today: NaiveDate) -> Self {
        let mut ledger = Self::new();
        let mut salary = Transaction::new(
            "Monthly salary",
            500_000,
            TransactionKind::Income,
            "Salary",
            today,
        );
        salary.status = TransactionStatus::Paid;
        let rent = Transaction::new(
            "Office rent",
            180_000,
            TransactionKind::Expense,
            "Housing",
            today,
        );
        let internet = Transaction::new(
            "Internet bill",
            9_900,
            TransactionKind::Expense,
            "Utilities",
            today,
        );
        ledger.transactions = vec![salary, rent, internet];
        ledger
    }
}

/// Splits an unsigned total into `count` shares of `total / count`, with
/// the division remainder added to the first share so the shares sum back
/// to the total exactly.
fn split_installments(total_cents: i64, count: u32) -> Vec<i64> {
    let count_i64 = count as i64;
    let share = total_cents / count_i64;
    let remainder = total_cents - share * count_i64;
    (0..count_i64)
        .map(|index| if index == 0 { share + remainder } else { share })
        .collect()
}

fn installment_label(description: &str, index: u32, count: u32) -> String {
    if count > 1 {
        format!("{} ({}/{})", description, index, count)
    } else {
        description.to_owned()
    }
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(LedgerError::Validation("description must not be empty".into()));
    }
    Ok(())
}

fn validate_magnitude(amount_cents: i64) -> Result<()> {
    if amount_cents <= 0 {
        return Err(LedgerError::Validation(
            "amount must be a positive magnitude".into(),
        ));
    }
    Ok(())
}
