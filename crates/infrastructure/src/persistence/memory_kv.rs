//! Process-local key-value store.

use std::collections::HashMap;
use std::sync::RwLock;

use riverchart_application::{PersistentKv, StorageError};

/// Key-value store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKv {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StorageError {
    StorageError::Io("store lock poisoned".to_string())
}

impl PersistentKv for InMemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.write().map_err(|_| poisoned())?.clear();
        Ok(())
    }
}
