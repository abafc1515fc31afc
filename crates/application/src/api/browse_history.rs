//! Browse-history endpoints

use riverchart_domain::PageRequest;
use serde_json::{Value, json};

use crate::error::RequestResult;
use crate::gateway::RequestGateway;

/// `/browse-history` endpoints.
#[derive(Clone)]
pub struct BrowseHistoryApi {
    gateway: RequestGateway,
}

impl BrowseHistoryApi {
    /// Creates the wrapper.
    #[must_use]
    pub const fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// `POST /browse-history/page`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn page(&self, request: &PageRequest) -> RequestResult<Value> {
        self.gateway
            .post("/browse-history/page", Some(request.to_value()))
            .await
    }

    /// `POST /browse-history/create`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn create(&self, entry: Value) -> RequestResult<Value> {
        self.gateway.post("/browse-history/create", Some(entry)).await
    }

    /// `DELETE /browse-history/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn delete(&self, id: i64) -> RequestResult<Value> {
        self.gateway
            .delete(&format!("/browse-history/{id}"), None)
            .await
    }

    /// `DELETE /browse-history/clear` for one content type.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn clear(&self, content_type: &str) -> RequestResult<Value> {
        self.gateway
            .delete(
                "/browse-history/clear",
                Some(json!({"contentType": content_type})),
            )
            .await
    }

    /// `GET /browse-history/listTimeRangeTypeList`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn time_range_types(&self) -> RequestResult<Value> {
        self.gateway
            .get("/browse-history/listTimeRangeTypeList", None)
            .await
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
    async fn test_clear_sends_content_type_body() {
        let harness = Harness::new();
        let api = BrowseHistoryApi::new(harness.gateway.clone());

        api.clear("article").await.unwrap();

        let sent = &harness.transport.requests()[0];
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.url, "http://localhost:8080/browse-history/clear");
        assert_eq!(sent.body, json!({"contentType": "article"}));
    }
}
