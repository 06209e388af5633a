// ============================================================================
// STORAGE - Durable key/value store (localStorage in the browser)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    #[error("could not write key {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Raw string store. Serialization is left to the caller so every entry stays
/// readable by other code that shares the same origin.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// `window.localStorage`
#[derive(Clone, Copy, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = LocalStorage::raw();
        storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// In-memory store, used before the browser store is reachable and in tests
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
