//! Wiring of the request/session layer.

use std::sync::Arc;

use riverchart_domain::ClientSettings;

use crate::api::{BrowseHistoryApi, CategoryApi, CollectionApi, ContentApi, TagApi, UserApi};
use crate::auth::{SessionSlot, SessionVault, TokenStore};
use crate::cache::{CategoryCache, CollectionCache};
use crate::gateway::{RequestGateway, UploadChannel};
use crate::ports::{Clock, Navigator, NetworkTransport, PersistentKv, PlatformAuth, UserFeedback};
use crate::session::SessionManager;

/// Platform capabilities the client is built on.
#[derive(Clone)]
pub struct ClientPorts {
    /// HTTP transport.
    pub transport: Arc<dyn NetworkTransport>,
    /// Durable key-value storage.
    pub storage: Arc<dyn PersistentKv>,
    /// Loading indicator and toasts.
    pub feedback: Arc<dyn UserFeedback>,
    /// Screen navigation.
    pub navigator: Arc<dyn Navigator>,
    /// Wall clock.
    pub clock: Arc<dyn Clock>,
    /// Platform single sign-on, when available.
    pub platform_auth: Option<Arc<dyn PlatformAuth>>,
}

/// Every component of the layer, sharing one session and one gateway.
#[derive(Clone)]
pub struct ClientContext {
    /// Token resolution.
    pub tokens: TokenStore,
    /// JSON calls.
    pub gateway: RequestGateway,
    /// File uploads.
    pub uploads: UploadChannel,
    /// Login and logout.
    pub session: SessionManager,
    /// Collected-item membership.
    pub collections: CollectionCache,
    /// Main categories and current selection.
    pub categories: CategoryCache,
    /// `/user` endpoints.
    pub users: UserApi,
    /// `/content` endpoints.
    pub contents: ContentApi,
    /// `/tag` endpoints.
    pub tags: TagApi,
    /// `/browse-history` endpoints.
    pub history: BrowseHistoryApi,
}

impl ClientContext {
    /// Builds the layer over the given ports.
    #[must_use]
    pub fn new(settings: ClientSettings, ports: ClientPorts) -> Self {
        let slot = SessionSlot::new();
        let vault = SessionVault::new(ports.storage);
        let tokens = TokenStore::new(slot.clone(), vault.clone());
        let collection_page_size = settings.collection_page_size;
        let category_page_size = settings.category_page_size;

        let gateway = RequestGateway::new(
            settings,
            ports.transport,
            ports.feedback.clone(),
            tokens.clone(),
        );
        let users = UserApi::new(gateway.clone());

        let mut session = SessionManager::new(users.clone(), slot, vault, ports.navigator);
        if let Some(platform) = ports.platform_auth {
            session = session.with_platform_auth(platform);
        }

        let collections = CollectionCache::new(
            CollectionApi::new(gateway.clone()),
            tokens.clone(),
            ports.feedback,
            ports.clock,
            collection_page_size,
        );
        let categories = CategoryCache::new(CategoryApi::new(gateway.clone()), category_page_size);

        Self {
            uploads: UploadChannel::new(gateway.clone()),
            contents: ContentApi::new(gateway.clone()),
            tags: TagApi::new(gateway.clone()),
            history: BrowseHistoryApi::new(gateway.clone()),
            tokens,
            session,
            collections,
            categories,
            users,
            gateway,
        }
    }

    /// Logs out and drops every per-user cache.
    pub async fn sign_out(&self) {
        self.session.logout().await;
        self.collections.clear().await;
        self.categories.clear_current().await;
    }
}
