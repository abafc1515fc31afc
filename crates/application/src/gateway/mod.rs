//! Outbound request pipeline
//!
//! [`RequestGateway`] handles JSON calls and [`UploadChannel`] multipart
//! file transfers. Both attach the same client-identity and auth headers
//! and drive the loading indicator through a [`LoadingGuard`].

mod loading;
mod request_gateway;
mod upload_channel;

pub use loading::LoadingGuard;
pub use request_gateway::RequestGateway;
pub use upload_channel::UploadChannel;

/// Header naming the client application.
pub const CLIENT_TYPE_HEADER: &str = "X-Client-Type";

/// Header carrying the client version.
pub const CLIENT_VERSION_HEADER: &str = "X-Client-Version";

/// Header that skips the tunnel provider's browser interstitial.
pub const TUNNEL_BYPASS_HEADER: &str = "ngrok-skip-browser-warning";

/// Header carrying the bearer token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";
