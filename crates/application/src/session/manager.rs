//! Session manager
//!
//! Owns the in-memory session slot and the persisted record. Every public
//! operation reports through an [`Outcome`]; nothing fails past this type.

use std::sync::Arc;

use riverchart_domain::{Session, UserId, token_preview};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use super::Credentials;
use crate::api::UserApi;
use crate::auth::{SessionSlot, SessionVault, TokenStore};
use crate::error::SessionError;
use crate::outcome::{LoginOutcome, Outcome, ProfileOutcome};
use crate::ports::{LOGIN_ROUTE, Navigator, PlatformAuth};

/// Authentication state of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session.
    Anonymous,
    /// A session with a user id and token is held.
    Authenticated {
        /// The logged-in user.
        user_id: UserId,
    },
}

impl SessionState {
    /// Returns true when authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Drives login, logout and profile refresh.
#[derive(Clone)]
pub struct SessionManager {
    users: UserApi,
    tokens: TokenStore,
    slot: SessionSlot,
    vault: SessionVault,
    navigator: Arc<dyn Navigator>,
    platform: Option<Arc<dyn PlatformAuth>>,
}

impl SessionManager {
    /// Creates a manager without platform sign-on.
    #[must_use]
    pub fn new(
        users: UserApi,
        slot: SessionSlot,
        vault: SessionVault,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            users,
            tokens: TokenStore::new(slot.clone(), vault.clone()),
            slot,
            vault,
            navigator,
            platform: None,
        }
    }

    /// Enables the platform single-sign-on flow for credential-less logins.
    #[must_use]
    pub fn with_platform_auth(mut self, platform: Arc<dyn PlatformAuth>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Warms the in-memory slot from storage. Returns the restored state.
    pub async fn restore(&self) -> SessionState {
        let state = self.state().await;
        if let SessionState::Authenticated { user_id } = state {
            info!(%user_id, "session restored");
        }
        state
    }

    /// Current authentication state.
    pub async fn state(&self) -> SessionState {
        self.tokens
            .current_user_id()
            .await
            .map_or(SessionState::Anonymous, |user_id| {
                SessionState::Authenticated { user_id }
            })
    }

    /// Returns true when a session is held.
    pub async fn is_logged_in(&self) -> bool {
        self.state().await.is_authenticated()
    }

    /// The logged-in user, if any.
    pub async fn current_user_id(&self) -> Option<UserId> {
        self.tokens.current_user_id().await
    }

    /// The cached profile of the logged-in user, if any.
    pub async fn profile(&self) -> Option<Value> {
        self.tokens.current_session().await.map(|s| s.profile)
    }

    /// Logs in.
    ///
    /// With non-empty credentials this calls the credential endpoint;
    /// otherwise the platform sign-on flow is used when configured. A
    /// failed attempt leaves any existing session untouched.
    pub async fn login(&self, credentials: Option<Credentials>) -> LoginOutcome {
        let result = match credentials.filter(|c| !c.is_empty()) {
            Some(credentials) => {
                debug!(fields = ?credentials, "credential login");
                self.users
                    .login(credentials.to_body())
                    .await
                    .map_err(SessionError::from)
            }
            None => self.platform_login().await,
        };

        match result.and_then(|payload| self.establish(&payload)) {
            Ok(session) => {
                let user_id = session.user_id;
                info!(%user_id, token = %token_preview(&session.token), "login succeeded");
                self.slot.set(session).await;
                Outcome::Success(user_id)
            }
            Err(err) => {
                error!(error = %err, "login failed");
                Outcome::Failure(err)
            }
        }
    }

    async fn platform_login(&self) -> Result<Value, SessionError> {
        let platform = self
            .platform
            .as_ref()
            .ok_or(SessionError::CredentialsRequired)?;
        let code = platform
            .request_login_code()
            .await
            .ok_or_else(|| SessionError::LoginFailed("platform login code unavailable".into()))?;

        let mut body = Map::new();
        body.insert("code".to_string(), Value::String(code));
        match platform.user_profile().await {
            Some(profile) => {
                if let Some(nick_name) = profile.nick_name {
                    body.insert("nickName".to_string(), Value::String(nick_name));
                }
                if let Some(avatar_url) = profile.avatar_url {
                    body.insert("avatarUrl".to_string(), Value::String(avatar_url));
                }
            }
            None => debug!("no platform profile, logging in with code only"),
        }

        Ok(self.users.wechat_login(Value::Object(body)).await?)
    }

    /// Builds the session from a login payload and persists it.
    fn establish(&self, payload: &Value) -> Result<Session, SessionError> {
        let session = Session::from_login_payload(payload)
            .map_err(|e| SessionError::LoginFailed(e.to_string()))?;
        if let Err(err) = self.vault.save(&session) {
            warn!(error = %err, "session could not be persisted");
        }
        Ok(session)
    }

    /// Logs out: clears storage and memory, then relaunches the login route.
    ///
    /// Storage goes first so a concurrent recovery either reads nothing or
    /// is discarded by the slot clear that follows.
    pub async fn logout(&self) {
        if let Err(err) = self.vault.clear() {
            warn!(error = %err, "persisted session could not be fully cleared");
        }
        self.slot.clear().await;
        info!("logged out");
        self.navigator.relaunch(LOGIN_ROUTE);
    }

    /// Fetches the profile of the logged-in user and caches it.
    ///
    /// `Success(None)` when nobody is logged in.
    pub async fn get_user_info(&self) -> ProfileOutcome {
        let Some(user_id) = self.current_user_id().await else {
            return Outcome::Success(None);
        };
        match self.users.get_by_id(user_id).await {
            Ok(profile) => Outcome::Success(Some(self.cache_profile(profile).await)),
            Err(err) => {
                error!(%user_id, error = %err, "fetching profile failed");
                Outcome::Failure(err.into())
            }
        }
    }

    /// Updates the profile of the logged-in user and caches the result.
    ///
    /// An empty response keeps the cached profile with `changes` merged in.
    pub async fn update_user_info(&self, changes: Value) -> ProfileOutcome {
        let Some(user_id) = self.current_user_id().await else {
            return Outcome::Success(None);
        };
        match self.users.update(user_id, changes.clone()).await {
            Ok(Value::Null) => {
                let mut merged = self.profile().await.unwrap_or(Value::Null);
                merge_object(&mut merged, changes);
                Outcome::Success(Some(self.cache_profile(merged).await))
            }
            Ok(profile) => Outcome::Success(Some(self.cache_profile(profile).await)),
            Err(err) => {
                error!(%user_id, error = %err, "updating profile failed");
                Outcome::Failure(err.into())
            }
        }
    }

    async fn cache_profile(&self, profile: Value) -> Value {
        if let Some(session) = self.slot.update_profile(profile.clone()).await
            && let Err(err) = self.vault.save(&session)
        {
            warn!(error = %err, "refreshed profile could not be persisted");
        }
        profile
    }
}

fn merge_object(target: &mut Value, changes: Value) {
    match (target, changes) {
        (Value::Object(target), Value::Object(changes)) => target.extend(changes),
        (target, changes) => *target = changes,
    }
}
