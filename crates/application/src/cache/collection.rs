//! Collected-item membership cache
//!
//! The local set only changes after the backend acknowledges a mutation,
//! or wholesale from a fresh snapshot. A periodic resync repairs any drift
//! left by concurrent toggles.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use riverchart_domain::{CollectionMembership, CollectionRecord, ContentId, RequestOptions};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::api::CollectionApi;
use crate::auth::TokenStore;
use crate::error::CollectionError;
use crate::messages;
use crate::outcome::{CollectionOutcome, Outcome};
use crate::ports::{Clock, ToastKind, UserFeedback};

/// Shortest period accepted by
/// [`spawn_periodic_resync`](CollectionCache::spawn_periodic_resync).
pub const MIN_RESYNC_PERIOD: Duration = Duration::from_secs(1);

/// Membership cache for the current user's collected content.
#[derive(Clone)]
pub struct CollectionCache {
    api: CollectionApi,
    tokens: TokenStore,
    feedback: Arc<dyn UserFeedback>,
    clock: Arc<dyn Clock>,
    page_size: u32,
    membership: Arc<RwLock<CollectionMembership>>,
    last_synced: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl CollectionCache {
    /// Creates an empty cache. `page_size` should be large enough to fetch
    /// every record in one page.
    #[must_use]
    pub fn new(
        api: CollectionApi,
        tokens: TokenStore,
        feedback: Arc<dyn UserFeedback>,
        clock: Arc<dyn Clock>,
        page_size: u32,
    ) -> Self {
        Self {
            api,
            tokens,
            feedback,
            clock,
            page_size,
            membership: Arc::new(RwLock::new(CollectionMembership::new())),
            last_synced: Arc::new(RwLock::new(None)),
        }
    }

    /// Reloads the membership set from the backend and returns the fetched
    /// records.
    ///
    /// Returns an empty list without calling the backend when nobody is
    /// logged in. A failed fetch is logged, leaves the set as it was and
    /// also yields an empty list.
    pub async fn load_collections(&self) -> Vec<CollectionRecord> {
        self.fetch(&RequestOptions::default()).await
    }

    /// Same as [`load_collections`](Self::load_collections) without a
    /// loading indicator.
    pub async fn resync(&self) -> Vec<CollectionRecord> {
        self.fetch(&RequestOptions::new().silent()).await
    }

    async fn fetch(&self, options: &RequestOptions) -> Vec<CollectionRecord> {
        let generation = self.tokens.session_generation().await;
        let Some(user_id) = self.tokens.current_user_id().await else {
            debug!("not logged in, skipping collection load");
            return Vec::new();
        };

        match self.api.records(user_id, self.page_size, options).await {
            Ok(records) => {
                let membership = CollectionMembership::from_records(&records);
                let mut current = self.membership.write().await;
                if self.tokens.session_generation().await != generation {
                    debug!(%user_id, "session changed during collection load, result dropped");
                    return Vec::new();
                }
                debug!(%user_id, count = membership.len(), "collection membership loaded");
                *current = membership;
                *self.last_synced.write().await = Some(self.clock.now());
                records
            }
            Err(err) => {
                error!(%user_id, error = %err, "loading collections failed");
                Vec::new()
            }
        }
    }

    /// Returns true if the content item is in the local set.
    pub async fn is_collected(&self, content_id: ContentId) -> bool {
        self.membership.read().await.contains(content_id)
    }

    /// Collects an item. The local set changes only after the backend
    /// accepts the call.
    pub async fn add_collection(&self, content_id: ContentId) -> CollectionOutcome {
        let Some(user_id) = self.tokens.current_user_id().await else {
            self.feedback.toast(messages::LOGIN_REQUIRED, ToastKind::Plain);
            return Outcome::Failure(CollectionError::NotLoggedIn);
        };

        match self.api.create(user_id, content_id).await {
            Ok(_) => {
                self.membership.write().await.insert(content_id);
                info!(%user_id, %content_id, "content collected");
                self.feedback.toast(messages::COLLECTED, ToastKind::Success);
                Outcome::Success(())
            }
            Err(err) => {
                error!(%content_id, error = %err, "adding collection failed");
                Outcome::Failure(err.into())
            }
        }
    }

    /// Removes an item. The local set changes only after the backend
    /// accepts the call.
    pub async fn remove_collection(&self, content_id: ContentId) -> CollectionOutcome {
        match self.api.delete(content_id).await {
            Ok(_) => {
                self.membership.write().await.remove(content_id);
                info!(%content_id, "content uncollected");
                self.feedback.toast(messages::UNCOLLECTED, ToastKind::Success);
                Outcome::Success(())
            }
            Err(err) => {
                error!(%content_id, error = %err, "removing collection failed");
                Outcome::Failure(err.into())
            }
        }
    }

    /// Adds or removes depending on current membership.
    ///
    /// Not atomic: two concurrent toggles of the same item may both read
    /// the same membership.
    pub async fn toggle_collection(&self, content_id: ContentId) -> CollectionOutcome {
        if self.is_collected(content_id).await {
            self.remove_collection(content_id).await
        } else {
            self.add_collection(content_id).await
        }
    }

    /// Empties the set, e.g. after logout.
    pub async fn clear(&self) {
        *self.membership.write().await = CollectionMembership::new();
        *self.last_synced.write().await = None;
    }

    /// Collected ids in ascending order.
    pub async fn snapshot(&self) -> Vec<ContentId> {
        self.membership.read().await.sorted_ids()
    }

    /// When the set was last rebuilt from the backend.
    pub async fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        *self.last_synced.read().await
    }

    /// Spawns a task that calls [`resync`](Self::resync) every `every`,
    /// starting one period from now. Abort the handle to stop it.
    ///
    /// A zero period is raised to [`MIN_RESYNC_PERIOD`].
    #[must_use]
    pub fn spawn_periodic_resync(&self, every: Duration) -> JoinHandle<()> {
        let every = every.max(MIN_RESYNC_PERIOD);
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
            loop {
                ticker.tick().await;
                let records = cache.resync().await;
                debug!(count = records.len(), "periodic collection resync");
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::SessionSlot;
    use crate::error::{RequestError, TransportError};
    use crate::gateway::RequestGateway;
    use crate::ports::NetworkTransport;
    use crate::test_support::{Harness, json_response};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use riverchart_domain::{
        ClientSettings, FileUpload, HttpMethod, RequestDescriptor, TransportResponse,
    };
    use serde_json::json;

    /// Answers with one collected record after the session was cleared.
    struct LogoutMidFlight {
        slot: SessionSlot,
    }

    #[async_trait]
    impl NetworkTransport for LogoutMidFlight {
        async fn send(
            &self,
            _request: &RequestDescriptor,
        ) -> Result<TransportResponse, TransportError> {
            self.slot.clear().await;
            json_response(200, &json!({"code": 200, "data": [{"contentId": 7}]}))
        }

        async fn send_file(
            &self,
            _upload: &FileUpload,
        ) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Network("unsupported".into()))
        }
    }

    fn cache(harness: &Harness) -> CollectionCache {
        CollectionCache::new(
            CollectionApi::new(harness.gateway.clone()),
            harness.tokens.clone(),
            harness.feedback.clone(),
            harness.clock.clone(),
            1000,
        )
    }

    fn id(value: i64) -> ContentId {
        ContentId::new(value)
    }

    #[tokio::test]
    async fn test_load_replaces_membership() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);
        harness.transport.push(json_response(
            200,
            &json!({
                "code": 200,
                "data": {"records": [{"contentId": 1}, {"contentId": 3}], "total": 2}
            }),
        ));

        let records = cache.load_collections().await;

        assert_eq!(records.len(), 2);
        assert!(cache.is_collected(id(1)).await);
        assert!(!cache.is_collected(id(2)).await);
        assert!(cache.is_collected(id(3)).await);
        assert_eq!(cache.last_synced_at().await, Some(harness.clock.0));

        let sent = &harness.transport.requests()[0];
        assert_eq!(sent.url, "http://localhost:8080/user-collection/page");
        assert_eq!(
            sent.body,
            json!({"userId": 5, "pageNum": 1, "pageSize": 1000})
        );
    }

    #[tokio::test]
    async fn test_load_without_user_is_noop() {
        let harness = Harness::new();
        let cache = cache(&harness);

        assert!(cache.load_collections().await.is_empty());
        assert!(harness.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_membership() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);
        harness
            .transport
            .push(json_response(200, &json!({"data": [{"contentId": 4}]})));
        cache.load_collections().await;
        harness
            .transport
            .push(Err(TransportError::Network("offline".into())));

        assert!(cache.load_collections().await.is_empty());
        assert_eq!(cache.snapshot().await, vec![id(4)]);
    }

    #[tokio::test]
    async fn test_toggle_adds_after_ack() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);

        assert_eq!(cache.toggle_collection(id(9)).await, Outcome::Success(()));

        assert!(cache.is_collected(id(9)).await);
        let sent = &harness.transport.requests()[0];
        assert_eq!(sent.url, "http://localhost:8080/user-collection/create");
        assert_eq!(sent.body, json!({"userId": 5, "contentId": 9}));
        assert_eq!(
            harness.feedback.toasts(),
            vec![(messages::COLLECTED.to_string(), ToastKind::Success)]
        );
    }

    #[tokio::test]
    async fn test_toggle_failure_leaves_membership() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);
        harness
            .transport
            .push(Err(TransportError::Network("offline".into())));

        let outcome = cache.toggle_collection(id(9)).await;

        assert_eq!(
            outcome,
            Outcome::Failure(CollectionError::Request(RequestError::Transport(
                TransportError::Network("offline".into())
            )))
        );
        assert!(!cache.is_collected(id(9)).await);
    }

    #[tokio::test]
    async fn test_toggle_removes_collected_item() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);
        harness
            .transport
            .push(json_response(200, &json!({"data": {"list": [{"contentId": 9}]}})));
        cache.load_collections().await;

        assert!(cache.toggle_collection(id(9)).await.is_success());

        assert!(!cache.is_collected(id(9)).await);
        let sent = &harness.transport.requests()[1];
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.url, "http://localhost:8080/user-collection/9");
    }

    #[tokio::test]
    async fn test_add_requires_login() {
        let harness = Harness::new();
        let cache = cache(&harness);

        assert_eq!(
            cache.add_collection(id(1)).await,
            Outcome::Failure(CollectionError::NotLoggedIn)
        );
        assert!(harness.transport.requests().is_empty());
        assert_eq!(
            harness.feedback.toasts(),
            vec![(messages::LOGIN_REQUIRED.to_string(), ToastKind::Plain)]
        );
    }

    #[tokio::test]
    async fn test_resync_is_silent() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);

        cache.resync().await;

        assert_eq!(harness.transport.requests().len(), 1);
        assert_eq!(harness.feedback.shown(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_resync_runs_on_interval() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);

        let handle = cache.spawn_periodic_resync(Duration::from_secs(30));
        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(harness.transport.requests().is_empty());
        tokio::time::sleep(Duration::from_secs(32)).await;
        handle.abort();

        assert!(harness.transport.requests().len() >= 2);
    }

    #[tokio::test]
    async fn test_clear_empties_set() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);
        cache.add_collection(id(2)).await;

        cache.clear().await;

        assert!(cache.snapshot().await.is_empty());
        assert_eq!(cache.last_synced_at().await, None);
    }

    #[tokio::test]
    async fn test_load_finishing_after_logout_is_dropped() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let gateway = RequestGateway::new(
            ClientSettings::default(),
            Arc::new(LogoutMidFlight {
                slot: harness.slot.clone(),
            }),
            harness.feedback.clone(),
            harness.tokens.clone(),
        );
        let cache = CollectionCache::new(
            CollectionApi::new(gateway),
            harness.tokens.clone(),
            harness.feedback.clone(),
            harness.clock.clone(),
            1000,
        );

        assert!(cache.load_collections().await.is_empty());

        assert!(cache.snapshot().await.is_empty());
        assert_eq!(cache.last_synced_at().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_resync_period_uses_minimum() {
        let harness = Harness::new();
        harness.sign_in(5, "tok").await;
        let cache = cache(&harness);

        let handle = cache.spawn_periodic_resync(Duration::ZERO);
        tokio::time::sleep(MIN_RESYNC_PERIOD / 2).await;
        assert!(harness.transport.requests().is_empty());
        tokio::time::sleep(MIN_RESYNC_PERIOD).await;
        handle.abort();

        assert_eq!(harness.transport.requests().len(), 1);
    }
}
