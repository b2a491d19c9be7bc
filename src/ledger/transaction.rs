use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::Period;

/// Direction of a ledger entry. Income amounts are stored positive,
/// expenses negative; the sign is derived from the kind at write time,
/// never entered directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Applies this kind's sign convention to an unsigned magnitude.
    pub fn signed(&self, magnitude_cents: i64) -> i64 {
        match self {
            TransactionKind::Income => magnitude_cents,
            TransactionKind::Expense => -magnitude_cents,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Paid,
    Pending,
    Overdue,
    Rejected,
}

impl TransactionStatus {
    /// Paid and Rejected are manual end states; the automatic recompute
    /// pass never moves a transaction out of them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Paid | TransactionStatus::Rejected)
    }
}

/// Recurrence requested at creation time. `Fixed` tags a single entry
/// without materializing future periods; `Installments` expands into
/// `count` dated transactions at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Recurrence {
    Fixed,
    Installments { count: u32, period: Period },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    /// Signed minor units. Invariant: sign matches `kind`.
    pub amount_cents: i64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub status: TransactionStatus,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        magnitude_cents: i64,
        kind: TransactionKind,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount_cents: kind.signed(magnitude_cents),
            kind,
            category: category.into(),
            date,
            status: TransactionStatus::Pending,
            tags: BTreeSet::new(),
            note: None,
            recurrence: None,
        }
    }

    /// Unsigned magnitude of the amount.
    pub fn magnitude_cents(&self) -> i64 {
        self.amount_cents.abs()
    }

    /// "Approve payment" toggle: open states become Paid, Paid reverts to
    /// Pending.
    pub fn approve(&mut self) {
        self.status = match self.status {
            TransactionStatus::Paid => TransactionStatus::Pending,
            _ => TransactionStatus::Paid,
        };
    }

    /// "Reject payment" toggle: open states become Rejected, Rejected
    /// reverts to Pending.
    pub fn reject(&mut self) {
        self.status = match self.status {
            TransactionStatus::Rejected => TransactionStatus::Pending,
            _ => TransactionStatus::Rejected,
        };
    }
}
