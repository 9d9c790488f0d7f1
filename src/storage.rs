//! Browser Storage
//!
//! `KeyValueStorage` over `window.localStorage`.

use scan_core::{KeyValueStorage, StorageError};

use crate::js_error;

/// Stateless handle; the storage object is looked up on every call so the
/// handle stays `Send + Sync` and can live inside a signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or(StorageError::Unavailable)?;
    window
        .local_storage()
        .map_err(|e| StorageError::Read(js_error::message(&e)))?
        .ok_or(StorageError::Unavailable)
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read(js_error::message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(js_error::message(&e)))
    }
}
