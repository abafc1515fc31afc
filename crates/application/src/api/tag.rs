//! Tag and content-tag endpoints

use serde_json::{Value, json};

use crate::error::RequestResult;
use crate::gateway::RequestGateway;

/// `/tag` and `/content-tag` endpoints.
#[derive(Clone)]
pub struct TagApi {
    gateway: RequestGateway,
}

impl TagApi {
    /// Creates the wrapper.
    #[must_use]
    pub const fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// `GET /tag/query`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn query(&self, filters: Option<Value>) -> RequestResult<Value> {
        self.gateway.get("/tag/query", filters).await
    }

    /// `GET /tag/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn get_by_id(&self, id: i64) -> RequestResult<Value> {
        self.gateway.get(&format!("/tag/{id}"), None).await
    }

    /// `POST /tag/create`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn create(&self, tag: Value) -> RequestResult<Value> {
        self.gateway.post("/tag/create", Some(tag)).await
    }

    /// `PUT /tag/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn update(&self, id: i64, changes: Value) -> RequestResult<Value> {
        self.gateway.put(&format!("/tag/{id}"), Some(changes)).await
    }

    /// `DELETE /tag/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn delete(&self, id: i64) -> RequestResult<Value> {
        self.gateway.delete(&format!("/tag/{id}"), None).await
    }

    /// `POST /content-tag/create`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn create_content_tag(&self, link: Value) -> RequestResult<Value> {
        self.gateway.post("/content-tag/create", Some(link)).await
    }

    /// `POST /tag/batch-link-main-category`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn batch_link_main_category(&self, links: Value) -> RequestResult<Value> {
        self.gateway
            .post("/tag/batch-link-main-category", Some(links))
            .await
    }

    /// `POST /tag/batch-link-sub-category`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn batch_link_sub_category(&self, links: Value) -> RequestResult<Value> {
        self.gateway
            .post("/tag/batch-link-sub-category", Some(links))
            .await
    }

    /// `POST /tag/batch-link-content`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn batch_link_content(&self, links: Value) -> RequestResult<Value> {
        self.gateway
            .post("/tag/batch-link-content", Some(links))
            .await
    }

    /// `DELETE /content-tag/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn delete_content_tag(&self, id: i64) -> RequestResult<Value> {
        self.gateway
            .delete(&format!("/content-tag/{id}"), None)
            .await
    }

    /// `DELETE /content-tag/delete` for one object/tag link.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn delete_object_tag(
        &self,
        object_type: &str,
        object_id: i64,
        tag_id: i64,
    ) -> RequestResult<Value> {
        self.gateway
            .delete(
                "/content-tag/delete",
                Some(json!({"objectType": object_type, "objectId": object_id, "tagId": tag_id})),
            )
            .await
    }
}
