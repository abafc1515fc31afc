//! User-collection endpoints

use riverchart_domain::{
    CollectionRecord, ContentId, HttpMethod, PageRequest, RequestOptions, UserId, decode_records,
};
use serde_json::{Value, json};

use crate::error::RequestResult;
use crate::gateway::RequestGateway;

/// `/user-collection` endpoints.
#[derive(Clone)]
pub struct CollectionApi {
    gateway: RequestGateway,
}

impl CollectionApi {
    /// Creates the wrapper.
    #[must_use]
    pub const fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// Exposes the gateway for callers needing per-call options.
    #[must_use]
    pub const fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    /// `POST /user-collection/page`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn page(&self, request: &PageRequest) -> RequestResult<Value> {
        self.gateway
            .post("/user-collection/page", Some(request.to_value()))
            .await
    }

    /// Fetches the first page of a user's collection and decodes its records.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn records(
        &self,
        user_id: UserId,
        page_size: u32,
        options: &RequestOptions,
    ) -> RequestResult<Vec<CollectionRecord>> {
        let request = PageRequest::first(page_size).with("userId", user_id.get());
        let payload = self
            .gateway
            .call(
                HttpMethod::Post,
                "/user-collection/page",
                Some(request.to_value()),
                options,
            )
            .await?;
        Ok(decode_records(&payload))
    }

    /// `GET /user-collection/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn get_by_id(&self, id: i64) -> RequestResult<Value> {
        self.gateway
            .get(&format!("/user-collection/{id}"), None)
            .await
    }

    /// `POST /user-collection/create` with `{userId, contentId}`.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn create(&self, user_id: UserId, content_id: ContentId) -> RequestResult<Value> {
        self.gateway
            .post(
                "/user-collection/create",
                Some(json!({"userId": user_id, "contentId": content_id})),
            )
            .await
    }

    /// `PUT /user-collection/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn update(&self, id: i64, changes: Value) -> RequestResult<Value> {
        self.gateway
            .put(&format!("/user-collection/{id}"), Some(changes))
            .await
    }

    /// `DELETE /user-collection/{contentId}`; the backend keys removal by
    /// content id for the calling user.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn delete(&self, content_id: ContentId) -> RequestResult<Value> {
        self.gateway
            .delete(&format!("/user-collection/{content_id}"), None)
            .await
    }
}
