//! Authenticated session types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::id::UserId;

/// The authenticated identity plus bearer token of the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Backend user id.
    pub user_id: UserId,
    /// Bearer token attached to outbound calls.
    pub token: String,
    /// Full user record as returned by the backend.
    pub profile: Value,
}

impl Session {
    /// Builds a session from a login response payload.
    ///
    /// The user id is read from `id`, falling back to `userId`; the token
    /// from `token`. Both must be present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteIdentity` if either part is missing.
    pub fn from_login_payload(payload: &Value) -> DomainResult<Self> {
        let user_id = payload
            .get("id")
            .and_then(UserId::from_json)
            .or_else(|| payload.get("userId").and_then(UserId::from_json))
            .ok_or(DomainError::IncompleteIdentity("user id"))?;
        let token = payload
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(DomainError::IncompleteIdentity("token"))?;

        Ok(Self {
            user_id,
            token: token.to_string(),
            profile: payload.clone(),
        })
    }

    /// Replaces the cached profile, keeping the token.
    pub fn refresh_profile(&mut self, profile: Value) {
        self.profile = profile;
    }
}

/// Returns a loggable preview of a token (first 8 chars + ...).
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 12 {
        let head: String = token.chars().take(8).collect();
        format!("{head}...")
    } else {
        token.to_string()
    }
}

/// The persisted session record (`{userId, userInfo, token}`).
///
/// Older records carried the token only inside `userInfo`; decoding accepts
/// either location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    /// Backend user id.
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Full user record.
    #[serde(default)]
    pub user_info: Option<Value>,
    /// Bearer token.
    #[serde(default)]
    pub token: Option<String>,
}

impl PersistedSession {
    /// Recovers a session, or `None` if the record holds no usable token or id.
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        let nested = self.user_info.as_ref();
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .or_else(|| {
                nested
                    .and_then(|info| info.get("token"))
                    .and_then(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            })?;
        let user_id = self.user_id.or_else(|| {
            nested.and_then(|info| {
                info.get("id")
                    .and_then(UserId::from_json)
                    .or_else(|| info.get("userId").and_then(UserId::from_json))
            })
        })?;

        Some(Session {
            user_id,
            token,
            profile: self.user_info.unwrap_or(Value::Null),
        })
    }
}

impl From<&Session> for PersistedSession {
    fn from(session: &Session) -> Self {
        Self {
            user_id: Some(session.user_id),
            user_info: Some(session.profile.clone()),
            token: Some(session.token.clone()),
        }
    }
}
