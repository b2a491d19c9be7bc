#![doc(test(attr(deny(warnings))))]

//! Ledger Core owns a collection of income/expense transactions, derives
//! each entry's time-dependent status, and serves the filtered and
//! calendar-grouped views an agenda front end renders. Persistence goes
//! through a pluggable JSON key-value store; "today" comes from an
//! injected clock so status derivation stays deterministic.

pub mod clock;
pub mod engine;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
