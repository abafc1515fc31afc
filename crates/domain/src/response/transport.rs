//! Raw transport response

use serde::{Deserialize, Serialize};

/// What the transport hands back for a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Only an exact 200 counts as a delivered response; every other status
    /// is a transport-level failure.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}
