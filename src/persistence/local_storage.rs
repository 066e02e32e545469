//! LocalStorage-backed score store (WASM only)

use super::{ScoreStore, StorageError, parse_record};

/// Browser LocalStorage gateway
#[derive(Debug, Default)]
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    /// Bind to `window.localStorage`; a missing or blocked storage degrades to no-ops
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, best score will not persist");
        }
        Self { storage }
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<u32> {
        let storage = self.storage.as_ref()?;
        let raw = storage.get_item(key).ok().flatten()?;
        parse_record(&raw)
    }

    fn set(&mut self, key: &str, value: u32) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}
