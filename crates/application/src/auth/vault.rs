//! Persisted session record.

use std::sync::Arc;

use riverchart_domain::{PersistedSession, Session};
use tracing::warn;

use crate::error::StorageError;
use crate::ports::PersistentKv;

/// Storage key of the composite session record.
pub const SESSION_KEY: &str = "user-store";

/// Discrete keys written by older client versions; removed on logout.
pub const LEGACY_KEYS: [&str; 3] = ["userId", "userInfo", "token"];

/// Reads and writes the persisted session record.
#[derive(Clone)]
pub struct SessionVault {
    storage: Arc<dyn PersistentKv>,
}

impl SessionVault {
    /// Creates a vault over the given store.
    #[must_use]
    pub fn new(storage: Arc<dyn PersistentKv>) -> Self {
        Self { storage }
    }

    /// Loads the persisted session.
    ///
    /// A missing, unreadable or incomplete record yields `None`.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let raw = self.storage.get(SESSION_KEY)?;
        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(record) => record.into_session(),
            Err(error) => {
                warn!(%error, "persisted session record is unreadable");
                None
            }
        }
    }

    /// Persists the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or stored.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let record = serde_json::to_string(&PersistedSession::from(session))
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(SESSION_KEY, &record)
    }

    /// Removes the session record and the legacy discrete keys.
    ///
    /// # Errors
    ///
    /// Returns the first storage error; later keys are still attempted.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut first_error = self.storage.remove(SESSION_KEY).err();
        for key in LEGACY_KEYS {
            if let Err(error) = self.storage.remove(key) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::MemoryKv;
    use pretty_assertions::assert_eq;
    use riverchart_domain::UserId;
    use serde_json::json;

    #[test]
    fn test_save_and_load() {
        let kv = Arc::new(MemoryKv::default());
        let vault = SessionVault::new(kv.clone());
        assert!(vault.load().is_none());

        let session = Session::from_login_payload(&json!({"id": 42, "token": "t1"})).unwrap();
        vault.save(&session).unwrap();

        assert_eq!(vault.load(), Some(session));
        assert!(kv.get(SESSION_KEY).unwrap().contains("\"userId\":42"));
    }

    #[test]
    fn test_clear_removes_legacy_keys() {
        let kv = Arc::new(MemoryKv::default());
        for key in LEGACY_KEYS {
            kv.set(key, "x").unwrap();
        }
        kv.set("theme", "dark").unwrap();
        let vault = SessionVault::new(kv.clone());
        vault
            .save(&Session {
                user_id: UserId::new(1),
                token: "t".to_string(),
                profile: json!({}),
            })
            .unwrap();

        vault.clear().unwrap();

        assert!(kv.get(SESSION_KEY).is_none());
        assert!(LEGACY_KEYS.iter().all(|k| kv.get(k).is_none()));
        assert_eq!(kv.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_corrupt_record_is_ignored() {
        let kv = Arc::new(MemoryKv::default());
        kv.set(SESSION_KEY, "{not json").unwrap();
        assert!(SessionVault::new(kv).load().is_none());
    }
}
