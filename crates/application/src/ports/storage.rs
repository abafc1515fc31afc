//! Persistent key-value storage port

use crate::error::StorageError;

/// Synchronous, string-keyed storage that survives process restarts.
pub trait PersistentKv: Send + Sync {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be updated.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Removes every value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be updated.
    fn clear(&self) -> Result<(), StorageError>;
}
