//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the request/session core and the
//! platform: network transport, key-value storage, user feedback,
//! navigation, platform sign-on and time. Each port is a trait implemented
//! by adapters in the infrastructure layer.

mod clock;
mod feedback;
mod navigator;
mod platform_auth;
mod storage;
mod transport;

pub use clock::Clock;
pub use feedback::{ToastKind, UserFeedback};
pub use navigator::{LOGIN_ROUTE, Navigator};
pub use platform_auth::{PlatformAuth, PlatformProfile};
pub use storage::PersistentKv;
pub use transport::NetworkTransport;
