//! Storage Layer
//!
//! Abstract key-value storage the session is mirrored to.
//! The browser adapter wraps `localStorage`; `MemoryStorage` backs tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StorageError;
use crate::item::ScannedItem;

/// String key-value storage (the `localStorage` contract)
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read the stored item list. A missing key is an empty list.
pub fn load_items<S: KeyValueStorage + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Vec<ScannedItem>, StorageError> {
    match storage.get(key)? {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).map_err(StorageError::Corrupt)
        }
        _ => Ok(Vec::new()),
    }
}

/// Write the whole item list under `key`
pub fn save_items<S: KeyValueStorage + ?Sized>(
    storage: &S,
    key: &str,
    items: &[ScannedItem],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(items).map_err(StorageError::Encode)?;
    storage.set(key, &json)
}

/// In-memory storage with optional write failure injection
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `set` fail as if the quota were exceeded
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.lock() {
            *flag = fail;
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Read(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.lock().map(|f| *f).unwrap_or(false) {
            return Err(StorageError::Write("QuotaExceededError".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
