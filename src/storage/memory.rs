use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use serde_json::Value;

use crate::errors::{LedgerError, Result};

use super::Storage;

/// In-memory key-value store for tests and previews. Clones share the
/// same underlying map so an engine and its test can observe each other's
/// writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| LedgerError::Storage("memory store lock poisoned".into()))?;
        blobs.insert(key.to_string(), value.clone());
        Ok(())
    }
}
