//! Platform single sign-on port

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Display data the user consented to share through the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformProfile {
    /// Display name.
    pub nick_name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

/// Port for the host platform's sign-on flow.
#[async_trait]
pub trait PlatformAuth: Send + Sync {
    /// Obtains a short-lived login code, or `None` if the platform gave none.
    async fn request_login_code(&self) -> Option<String>;

    /// Obtains the user's consented profile, if available.
    async fn user_profile(&self) -> Option<PlatformProfile>;
}
