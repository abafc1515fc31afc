//! File-backed key-value store.
//!
//! All entries live in one JSON object on disk. Every write rewrites the
//! file, so the store survives process restarts.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use riverchart_application::{PersistentKv, StorageError};
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable};

/// Write-through key-value store persisted as a JSON file.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKvStore {
    /// Opens the store, loading existing entries. A missing file starts
    /// an empty store; the file is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => from_json_bytes(&bytes)
                .map_err(|e| StorageError::Serialization(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StorageError::Io(format!("{}: {e}", path.display()))),
        };
        debug!(path = %path.display(), entries = entries.len(), "key-value store opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Io("store lock poisoned".to_string()))?;
        let mut next = entries.clone();
        change(&mut next);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json =
            to_json_stable(entries).map_err(|e| StorageError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        fs::write(&self.path, json)
            .map_err(|e| StorageError::Io(format!("{}: {e}", self.path.display())))
    }
}

impl PersistentKv for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.mutate(BTreeMap::clear)
    }
}
