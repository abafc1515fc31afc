//! Main- and sub-category endpoints

use std::fmt;

use riverchart_domain::PageRequest;
use serde_json::Value;

use crate::error::RequestResult;
use crate::gateway::RequestGateway;

/// Which category tree level an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryLevel {
    /// `/main-category`
    Main,
    /// `/sub-category`
    Sub,
}

impl CategoryLevel {
    /// Path prefix of this level.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Main => "/main-category",
            Self::Sub => "/sub-category",
        }
    }
}

impl fmt::Display for CategoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Category endpoints for both levels.
#[derive(Clone)]
pub struct CategoryApi {
    gateway: RequestGateway,
}

impl CategoryApi {
    /// Creates the wrapper.
    #[must_use]
    pub const fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// `POST /{level}/page`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn page(&self, level: CategoryLevel, request: &PageRequest) -> RequestResult<Value> {
        self.gateway
            .post(&format!("{level}/page"), Some(request.to_value()))
            .await
    }

    /// `GET /{level}/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn get_by_id(&self, level: CategoryLevel, id: i64) -> RequestResult<Value> {
        self.gateway.get(&format!("{level}/{id}"), None).await
    }

    /// `POST /{level}/create`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn create(&self, level: CategoryLevel, category: Value) -> RequestResult<Value> {
        self.gateway
            .post(&format!("{level}/create"), Some(category))
            .await
    }

    /// `PUT /{level}/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn update(
        &self,
        level: CategoryLevel,
        id: i64,
        changes: Value,
    ) -> RequestResult<Value> {
        self.gateway
            .put(&format!("{level}/{id}"), Some(changes))
            .await
    }

    /// `DELETE /{level}/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn delete(&self, level: CategoryLevel, id: i64) -> RequestResult<Value> {
        self.gateway.delete(&format!("{level}/{id}"), None).await
    }

    /// `POST /{level}/{id}/tags`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn tags(&self, level: CategoryLevel, id: i64) -> RequestResult<Value> {
        self.gateway.post(&format!("{level}/{id}/tags"), None).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use pretty_assertions::assert_eq;
    use riverchart_domain::HttpMethod;

    #[tokio::test]
    async fn test_level_selects_path() {
        let harness = Harness::new();
        let api = CategoryApi::new(harness.gateway.clone());

        api.tags(CategoryLevel::Sub, 5).await.unwrap();
        api.delete(CategoryLevel::Main, 2).await.unwrap();

        let sent = harness.transport.requests();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].url, "http://localhost:8080/sub-category/5/tags");
        assert_eq!(sent[1].method, HttpMethod::Delete);
        assert_eq!(sent[1].url, "http://localhost:8080/main-category/2");
    }
}
