use serde::Serialize;

use super::transaction::{Transaction, TransactionKind, TransactionStatus};

/// Realized-cash totals. Only Paid entries contribute; open and rejected
/// entries are excluded by design. Expense totals carry their negative
/// sign, so the balance is a plain sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub income_paid_cents: i64,
    pub expense_paid_cents: i64,
    pub balance_cents: i64,
}

pub fn summarize(transactions: &[Transaction]) -> LedgerSummary {
    let mut summary = LedgerSummary::default();
    for txn in transactions {
        if txn.status != TransactionStatus::Paid {
            continue;
        }
        match txn.kind {
            TransactionKind::Income => summary.income_paid_cents += txn.amount_cents,
            TransactionKind::Expense => summary.expense_paid_cents += txn.amount_cents,
        }
    }
    summary.balance_cents = summary.income_paid_cents + summary.expense_paid_cents;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(magnitude: i64, kind: TransactionKind, status: TransactionStatus) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 7, 10).unwrap();
        let mut txn = Transaction::new("Entry", magnitude, kind, "Misc", date);
        txn.status = status;
        txn
    }

    #[test]
    fn only_paid_entries_contribute() {
        let txns = vec![
            entry(5000, TransactionKind::Income, TransactionStatus::Pending),
            entry(50, TransactionKind::Expense, TransactionStatus::Paid),
            entry(900, TransactionKind::Income, TransactionStatus::Overdue),
            entry(70, TransactionKind::Expense, TransactionStatus::Rejected),
        ];
        let summary = summarize(&txns);
        assert_eq!(summary.income_paid_cents, 0);
        assert_eq!(summary.expense_paid_cents, -50);
        assert_eq!(summary.balance_cents, -50);
    }

    #[test]
    fn balance_is_signed_sum_of_paid_amounts() {
        let txns = vec![
            entry(3000, TransactionKind::Income, TransactionStatus::Paid),
            entry(1200, TransactionKind::Expense, TransactionStatus::Paid),
        ];
        let summary = summarize(&txns);
        assert_eq!(summary.income_paid_cents, 3000);
        assert_eq!(summary.expense_paid_cents, -1200);
        assert_eq!(summary.balance_cents, 1800);
    }

    #[test]
    fn adding_open_entries_leaves_totals_unchanged() {
        let mut txns = vec![entry(3000, TransactionKind::Income, TransactionStatus::Paid)];
        let before = summarize(&txns);
        txns.push(entry(999, TransactionKind::Expense, TransactionStatus::Pending));
        txns.push(entry(999, TransactionKind::Income, TransactionStatus::Overdue));
        assert_eq!(summarize(&txns), before);
    }
}
