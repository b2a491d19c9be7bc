//! Ledger domain models, status derivation, and the agenda groupings.

pub mod calendar;
pub mod filter;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod status;
pub mod summary;
pub mod transaction;

pub use calendar::{day_flags, group_by_day, group_by_month, group_by_week, DayFlags};
pub use filter::TransactionFilter;
pub use ledger::{Ledger, TransactionInput, TransactionPatch};
pub use period::Period;
pub use status::recompute_statuses;
pub use summary::{summarize, LedgerSummary};
pub use transaction::{Recurrence, Transaction, TransactionKind, TransactionStatus};
