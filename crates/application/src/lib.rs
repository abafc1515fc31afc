//! RiverChart Application - Request/session layer
//!
//! This crate defines the application layer with:
//! - Port traits for transport, storage, user feedback and navigation
//! - Token resolution over the in-memory and persisted session
//! - The request gateway and upload channel
//! - Session lifecycle and the client-side caches
//! - Typed wrappers for the backend endpoints

pub mod api;
pub mod auth;
pub mod cache;
pub mod context;
pub mod error;
pub mod gateway;
pub mod messages;
pub mod outcome;
pub mod ports;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{
    BrowseHistoryApi, CategoryApi, CategoryLevel, CollectionApi, ContentApi, TagApi, UserApi,
};
pub use auth::{SessionSlot, SessionVault, TokenStore};
pub use cache::{CategoryCache, CollectionCache};
pub use context::{ClientContext, ClientPorts};
pub use error::{
    CollectionError, RequestError, RequestResult, SessionError, StorageError, TransportError,
};
pub use gateway::{LoadingGuard, RequestGateway, UploadChannel};
pub use outcome::{CollectionOutcome, LoginOutcome, Outcome, ProfileOutcome};
pub use ports::{
    Clock, Navigator, NetworkTransport, PersistentKv, PlatformAuth, PlatformProfile, ToastKind,
    UserFeedback,
};
pub use session::{Credentials, SessionManager, SessionState};
