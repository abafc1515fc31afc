//! Bearer token resolution.
//!
//! The in-memory slot is the fast path; the persisted record is the
//! durable source. A miss in memory falls back to storage and warms the
//! slot with whatever it finds. Nothing here touches the network.

use riverchart_domain::{Session, UserId, token_preview};
use tracing::debug;

use super::{SessionSlot, SessionVault};

/// Resolves the current session and token.
#[derive(Clone)]
pub struct TokenStore {
    slot: SessionSlot,
    vault: SessionVault,
}

impl TokenStore {
    /// Creates a token store reading the given slot and vault.
    #[must_use]
    pub const fn new(slot: SessionSlot, vault: SessionVault) -> Self {
        Self { slot, vault }
    }

    /// Returns the current session, recovering it from storage if the
    /// in-memory slot is empty.
    ///
    /// A logout that lands while storage is being read wins: the recovered
    /// session is dropped instead of refilling the cleared slot.
    pub async fn current_session(&self) -> Option<Session> {
        let (current, seen) = self.slot.snapshot().await;
        if current.is_some() {
            return current;
        }
        let recovered = self.vault.load()?;
        debug!(
            user_id = %recovered.user_id,
            token = %token_preview(&recovered.token),
            "session restored from storage"
        );
        self.slot.adopt(recovered, seen).await
    }

    /// Generation of the in-memory session. Changes on every login and
    /// logout.
    pub async fn session_generation(&self) -> u64 {
        self.slot.generation().await
    }

    /// Returns the bearer token, or `None` when unauthenticated.
    pub async fn resolve_token(&self) -> Option<String> {
        self.current_session().await.map(|s| s.token)
    }

    /// Returns the current user id, or `None` when unauthenticated.
    pub async fn current_user_id(&self) -> Option<UserId> {
        self.current_session().await.map(|s| s.user_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::MemoryKv;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn store() -> (TokenStore, SessionSlot, SessionVault) {
        let slot = SessionSlot::new();
        let vault = SessionVault::new(Arc::new(MemoryKv::default()));
        (TokenStore::new(slot.clone(), vault.clone()), slot, vault)
    }

    #[tokio::test]
    async fn test_no_session_is_unauthenticated() {
        let (tokens, _, _) = store();
        assert_eq!(tokens.resolve_token().await, None);
        assert_eq!(tokens.current_user_id().await, None);
    }

    #[tokio::test]
    async fn test_memory_slot_wins() {
        let (tokens, slot, vault) = store();
        let stored = Session::from_login_payload(&json!({"id": 1, "token": "disk"})).unwrap();
        vault.save(&stored).unwrap();
        slot.set(Session::from_login_payload(&json!({"id": 1, "token": "memory"})).unwrap())
            .await;

        assert_eq!(tokens.resolve_token().await.as_deref(), Some("memory"));
    }

    #[tokio::test]
    async fn test_recovery_warms_memory_slot() {
        let (tokens, slot, vault) = store();
        let stored = Session::from_login_payload(&json!({"id": 9, "token": "t9"})).unwrap();
        vault.save(&stored).unwrap();
        assert!(slot.get().await.is_none());

        assert_eq!(tokens.resolve_token().await.as_deref(), Some("t9"));
        assert_eq!(slot.get().await, Some(stored));
    }

    #[tokio::test]
    async fn test_memory_never_written_back_to_storage() {
        let (tokens, slot, vault) = store();
        slot.set(Session::from_login_payload(&json!({"id": 2, "token": "m"})).unwrap())
            .await;

        assert!(tokens.resolve_token().await.is_some());
        assert!(vault.load().is_none());
    }
}
