//! Persistence backends for the ledger blob.

pub mod json_backend;
pub mod memory;

use serde_json::Value;

use crate::errors::Result;

/// Abstraction over key-value JSON blob stores. The engine always writes
/// the full collection under one key; there are no partial or delta
/// writes.
pub trait Storage: Send + Sync {
    /// Returns the blob stored under `key`, or `None` when the key has
    /// never been written.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Replaces the blob stored under `key`.
    fn save(&self, key: &str, value: &Value) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
