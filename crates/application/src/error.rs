//! Application error types

use thiserror::Error;

/// Failures raised by the transport or by a non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a status other than 200.
    #[error("HTTP {0}")]
    Status(u16),

    /// The call exceeded its timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_ms: u64,
    },

    /// The network exchange failed.
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A local file could not be read.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors surfaced by the request gateway and upload channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// Non-200 status or network failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The envelope code signalled an application-level failure.
    #[error("{message}")]
    Business {
        /// The envelope code as sent by the server.
        code: String,
        /// Server-supplied message, or the generic fallback.
        message: String,
    },

    /// A file upload failed.
    #[error("upload failed: {0}")]
    Upload(TransportError),
}

impl RequestError {
    /// Returns true for transport-level failures (including failed uploads).
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Upload(_))
    }

    /// Returns true for envelope-level failures.
    #[must_use]
    pub const fn is_business(&self) -> bool {
        matches!(self, Self::Business { .. })
    }
}

/// Result type alias for gateway calls.
pub type RequestResult<T> = Result<T, RequestError>;

/// Errors raised by the persistent key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// A stored value could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Session establishment failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No credentials were given and no platform sign-on is available.
    #[error("login credentials required")]
    CredentialsRequired,

    /// The login flow completed without a usable identity.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// The login call itself failed.
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Collection mutation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// No authenticated user.
    #[error("not logged in")]
    NotLoggedIn,

    /// The backend call failed.
    #[error(transparent)]
    Request(#[from] RequestError),
}
