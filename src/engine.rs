//! Stateful facade wiring the pure ledger logic to a storage backend and
//! a clock. Reads run the status recompute pass first and persist its
//! outcome so statuses do not flicker between sessions; mutations rewrite
//! the full collection.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::{
    clock::Clock,
    errors::Result,
    ledger::{
        day_flags, group_by_day, group_by_month, group_by_week, recompute_statuses, summarize,
        DayFlags, Ledger, LedgerSummary, Transaction, TransactionFilter, TransactionInput,
        TransactionPatch, TransactionStatus,
    },
    storage::Storage,
};

pub const DEFAULT_LEDGER_KEY: &str = "transactions";

pub struct LedgerEngine<S: Storage, C: Clock> {
    storage: S,
    clock: C,
    key: String,
    ledger: Ledger,
}

impl<S: Storage, C: Clock> LedgerEngine<S, C> {
    /// Opens the ledger under the default key. An absent blob starts an
    /// empty collection.
    pub fn open(storage: S, clock: C) -> Result<Self> {
        Self::open_with(storage, clock, DEFAULT_LEDGER_KEY, None)
    }

    /// Opens the ledger, seeding the example starter set when the key has
    /// never been written.
    pub fn open_or_seed(storage: S, clock: C) -> Result<Self> {
        let seed = Ledger::example(clock.today());
        Self::open_with(storage, clock, DEFAULT_LEDGER_KEY, Some(seed))
    }

    pub fn open_with(storage: S, clock: C, key: &str, seed: Option<Ledger>) -> Result<Self> {
        let ledger = match storage.load(key)? {
            Some(value) => serde_json::from_value(value)?,
            None => {
                debug!(key, "no persisted ledger, starting fresh");
                seed.unwrap_or_default()
            }
        };
        let mut engine = Self {
            storage,
            clock,
            key: key.to_string(),
            ledger,
        };
        // Session-load recompute pass; runs before any read is served.
        engine.refresh()?;
        Ok(engine)
    }

    /// Today according to the injected clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Runs the status recompute pass and persists the result when it
    /// changed anything.
    pub fn refresh(&mut self) -> Result<()> {
        let today = self.clock.today();
        let recomputed = recompute_statuses(&self.ledger.transactions, today);
        let changed = recomputed
            .iter()
            .zip(&self.ledger.transactions)
            .any(|(fresh, old)| fresh.status != old.status);
        if changed {
            debug!(%today, "recompute pass updated statuses");
            self.ledger.transactions = recomputed;
            self.ledger.touch();
            self.persist()?;
        }
        Ok(())
    }

    /// Current collection, recomputed and persisted first.
    pub fn transactions(&mut self) -> Result<Vec<Transaction>> {
        self.refresh()?;
        Ok(self.ledger.transactions.clone())
    }

    /// Adds one entry, or several when the input requests an installment
    /// split. Returns the created transactions in date order.
    pub fn add_transaction(&mut self, input: TransactionInput) -> Result<Vec<Transaction>> {
        let today = self.clock.today();
        let ids = self.ledger.add(input, today)?;
        self.persist()?;
        debug!(count = ids.len(), "transactions added");
        Ok(ids
            .iter()
            .filter_map(|id| self.ledger.transaction(*id).cloned())
            .collect())
    }

    pub fn edit_transaction(&mut self, id: Uuid, patch: TransactionPatch) -> Result<Transaction> {
        let updated = self.ledger.edit(id, patch)?;
        self.persist()?;
        Ok(updated)
    }

    pub fn delete_transaction(&mut self, id: Uuid) -> Result<Transaction> {
        let removed = self.ledger.remove(id)?;
        self.persist()?;
        debug!(%id, "transaction deleted");
        Ok(removed)
    }

    pub fn set_status(&mut self, id: Uuid, status: TransactionStatus) -> Result<Transaction> {
        let updated = self.ledger.set_status(id, status)?;
        self.persist()?;
        Ok(updated)
    }

    /// "Approve payment" toggle.
    pub fn approve(&mut self, id: Uuid) -> Result<Transaction> {
        let updated = self.ledger.approve(id)?;
        self.persist()?;
        Ok(updated)
    }

    /// "Reject payment" toggle.
    pub fn reject(&mut self, id: Uuid) -> Result<Transaction> {
        let updated = self.ledger.reject(id)?;
        self.persist()?;
        Ok(updated)
    }

    /// Filtered view of the recomputed collection.
    pub fn filter(&mut self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.refresh()?;
        Ok(filter.apply(&self.ledger.transactions))
    }

    /// Realized-cash totals over the recomputed collection.
    pub fn summarize(&mut self) -> Result<LedgerSummary> {
        self.refresh()?;
        Ok(summarize(&self.ledger.transactions))
    }

    /// Agenda groupings over an already-filtered slice; callers filter
    /// once, then group.
    pub fn agenda_by_day(&self, filtered: &[Transaction]) -> BTreeMap<NaiveDate, Vec<Transaction>> {
        group_by_day(filtered)
    }

    pub fn agenda_by_week(&self, filtered: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
        group_by_week(filtered)
    }

    pub fn agenda_by_month(&self, filtered: &[Transaction]) -> BTreeMap<String, Vec<Transaction>> {
        group_by_month(filtered)
    }

    /// Calendar badge flags per day for an already-filtered slice.
    pub fn agenda_day_flags(&self, filtered: &[Transaction]) -> BTreeMap<NaiveDate, DayFlags> {
        day_flags(filtered)
    }

    /// Sorted distinct category labels for UI suggestions.
    pub fn known_categories(&self) -> Vec<String> {
        self.ledger.known_categories()
    }

    fn persist(&self) -> Result<()> {
        let value = serde_json::to_value(&self.ledger)?;
        self.storage.save(&self.key, &value)
    }
}
