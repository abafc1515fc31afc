//! User endpoints

use riverchart_domain::UserId;
use serde_json::Value;

use crate::error::RequestResult;
use crate::gateway::RequestGateway;

/// `/user` and `/auth` endpoints.
#[derive(Clone)]
pub struct UserApi {
    gateway: RequestGateway,
}

impl UserApi {
    /// Creates the wrapper.
    #[must_use]
    pub const fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// `POST /user/login`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn login(&self, credentials: Value) -> RequestResult<Value> {
        self.gateway.post("/user/login", Some(credentials)).await
    }

    /// `POST /auth/wechat-login` with `{code, nickName?, avatarUrl?}`.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn wechat_login(&self, body: Value) -> RequestResult<Value> {
        self.gateway.post("/auth/wechat-login", Some(body)).await
    }

    /// `POST /user/create`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn create(&self, user: Value) -> RequestResult<Value> {
        self.gateway.post("/user/create", Some(user)).await
    }

    /// `GET /user/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn get_by_id(&self, id: UserId) -> RequestResult<Value> {
        self.gateway.get(&format!("/user/{id}"), None).await
    }

    /// `PUT /user/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn update(&self, id: UserId, changes: Value) -> RequestResult<Value> {
        self.gateway.put(&format!("/user/{id}"), Some(changes)).await
    }

    /// `DELETE /user/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn delete(&self, id: UserId) -> RequestResult<Value> {
        self.gateway.delete(&format!("/user/{id}"), None).await
    }
}
