//! Best score persistence
//!
//! The game only ever stores one integer, the best score, under a fixed key. Values are kept as
//! decimal strings so the record stays readable in the browser's storage inspector.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage write failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage rejected the write: {0}")]
    Rejected(String),
}

/// Key-value gateway for persisted integers
pub trait ScoreStore {
    /// Stored value, or `None` if absent or unreadable
    fn get(&self, key: &str) -> Option<u32>;

    fn set(&mut self, key: &str, value: u32) -> Result<(), StorageError>;
}

/// Parse a stored record. Anything other than a plain non-negative integer counts as absent.
pub fn parse_record(raw: &str) -> Option<u32> {
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable stored value {:?}: {}", raw, e);
            None
        }
    }
}

/// In-memory store (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw record, as a previous session would have left it
    pub fn with_raw(mut self, key: &str, raw: &str) -> Self {
        self.entries.insert(key.to_string(), raw.to_string());
        self
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<u32> {
        self.entries.get(key).and_then(|raw| parse_record(raw))
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("snake_best_v1"), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryStore::new();
        store.set("snake_best_v1", 17).unwrap();
        assert_eq!(store.get("snake_best_v1"), Some(17));
    }

    #[test]
    fn test_parse_record() {
        assert_eq!(parse_record("42"), Some(42));
        assert_eq!(parse_record(" 8\n"), Some(8));
        assert_eq!(parse_record(""), None);
        assert_eq!(parse_record("-3"), None);
        assert_eq!(parse_record("lots"), None);
    }

    #[test]
    fn test_corrupt_record_reads_as_absent() {
        let store = MemoryStore::new().with_raw("snake_best_v1", "NaN");
        assert_eq!(store.get("snake_best_v1"), None);
    }
}
