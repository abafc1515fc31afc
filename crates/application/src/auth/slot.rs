//! In-memory session slot.

use std::sync::Arc;

use riverchart_domain::Session;
use serde_json::Value;
use tokio::sync::RwLock;

/// Process-scoped cell holding the current session.
///
/// Owned by the session manager; the token store holds a clone of the
/// handle so it can read the session and warm it from storage. Every
/// `set` and `clear` bumps a generation counter so readers that went to
/// storage can tell whether the session changed while they were away.
#[derive(Debug, Clone, Default)]
pub struct SessionSlot {
    inner: Arc<RwLock<SlotState>>,
}

#[derive(Debug, Default)]
struct SlotState {
    session: Option<Session>,
    generation: u64,
}

impl SessionSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current session.
    pub async fn get(&self) -> Option<Session> {
        self.inner.read().await.session.clone()
    }

    /// Returns the current session together with the generation it was
    /// read at.
    pub async fn snapshot(&self) -> (Option<Session>, u64) {
        let state = self.inner.read().await;
        (state.session.clone(), state.generation)
    }

    /// Current generation.
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Replaces the current session.
    pub async fn set(&self, session: Session) {
        let mut state = self.inner.write().await;
        state.session = Some(session);
        state.generation += 1;
    }

    /// Fills an empty slot with a session recovered from storage and
    /// returns whichever session ends up in it.
    ///
    /// `seen` is the generation observed before storage was read. A
    /// session stored concurrently wins over the recovered one, and a
    /// slot that was cleared since `seen` stays empty.
    pub async fn adopt(&self, recovered: Session, seen: u64) -> Option<Session> {
        let mut state = self.inner.write().await;
        if state.session.is_none() && state.generation == seen {
            state.session = Some(recovered);
        }
        state.session.clone()
    }

    /// Replaces the profile of the current session. Returns the updated
    /// session, or `None` if the slot is empty.
    pub async fn update_profile(&self, profile: Value) -> Option<Session> {
        let mut state = self.inner.write().await;
        let session = state.session.as_mut()?;
        session.refresh_profile(profile);
        Some(session.clone())
    }

    /// Empties the slot.
    pub async fn clear(&self) {
        let mut state = self.inner.write().await;
        state.session = None;
        state.generation += 1;
    }
}
