//! Automatic status derivation over time.

use chrono::NaiveDate;

use super::transaction::{Transaction, TransactionStatus};

/// Recompute pass run once per load, before any read is served: an open
/// entry dated before `today` becomes Overdue, and an Overdue entry whose
/// date moved back to today or later returns to Pending. Paid and Rejected
/// entries are never touched. Pure and order-preserving; the caller
/// persists the result.
pub fn recompute_statuses(transactions: &[Transaction], today: NaiveDate) -> Vec<Transaction> {
    transactions
        .iter()
        .cloned()
        .map(|mut txn| {
            if txn.status.is_terminal() {
                return txn;
            }
            if txn.date < today {
                txn.status = TransactionStatus::Overdue;
            } else if txn.status == TransactionStatus::Overdue {
                txn.status = TransactionStatus::Pending;
            }
            txn
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(day: NaiveDate, status: TransactionStatus) -> Transaction {
        let mut txn = Transaction::new("Entry", 100, TransactionKind::Expense, "Bills", day);
        txn.status = status;
        txn
    }

    #[test]
    fn past_due_pending_becomes_overdue() {
        let today = date(2025, 7, 20);
        let txns = vec![entry(date(2025, 7, 15), TransactionStatus::Pending)];
        let out = recompute_statuses(&txns, today);
        assert_eq!(out[0].status, TransactionStatus::Overdue);
    }

    #[test]
    fn terminal_states_are_never_touched() {
        let today = date(2025, 7, 20);
        let txns = vec![
            entry(date(2020, 1, 1), TransactionStatus::Paid),
            entry(date(2020, 1, 1), TransactionStatus::Rejected),
        ];
        let out = recompute_statuses(&txns, today);
        assert_eq!(out[0].status, TransactionStatus::Paid);
        assert_eq!(out[1].status, TransactionStatus::Rejected);
    }

    #[test]
    fn overdue_returns_to_pending_when_date_moves_forward() {
        let today = date(2025, 7, 20);
        let txns = vec![entry(date(2025, 7, 25), TransactionStatus::Overdue)];
        let out = recompute_statuses(&txns, today);
        assert_eq!(out[0].status, TransactionStatus::Pending);
    }

    #[test]
    fn due_today_stays_pending() {
        let today = date(2025, 7, 20);
        let txns = vec![entry(today, TransactionStatus::Pending)];
        let out = recompute_statuses(&txns, today);
        assert_eq!(out[0].status, TransactionStatus::Pending);
    }

    #[test]
    fn recompute_is_idempotent() {
        let today = date(2025, 7, 20);
        let txns = vec![
            entry(date(2025, 7, 10), TransactionStatus::Pending),
            entry(date(2025, 7, 25), TransactionStatus::Overdue),
            entry(date(2025, 7, 1), TransactionStatus::Paid),
        ];
        let once = recompute_statuses(&txns, today);
        let twice = recompute_statuses(&once, today);
        let statuses: Vec<_> = once.iter().map(|t| t.status).collect();
        let statuses_again: Vec<_> = twice.iter().map(|t| t.status).collect();
        assert_eq!(statuses, statuses_again);
    }

    #[test]
    fn order_is_preserved() {
        let today = date(2025, 7, 20);
        let txns = vec![
            entry(date(2025, 7, 1), TransactionStatus::Pending),
            entry(date(2025, 7, 25), TransactionStatus::Pending),
        ];
        let out = recompute_statuses(&txns, today);
        assert_eq!(out[0].id, txns[0].id);
        assert_eq!(out[1].id, txns[1].id);
    }
}
