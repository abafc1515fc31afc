//! Content endpoints

use std::path::PathBuf;

use riverchart_domain::{ContentId, PageRequest, RequestOptions};
use serde_json::{Map, Value};

use crate::error::RequestResult;
use crate::gateway::{RequestGateway, UploadChannel};

/// Form field carrying image files for `/content/upload-images`.
pub const CONTENT_IMAGE_FIELD: &str = "files";

/// `/content` endpoints.
#[derive(Clone)]
pub struct ContentApi {
    gateway: RequestGateway,
    uploads: UploadChannel,
}

impl ContentApi {
    /// Creates the wrapper.
    #[must_use]
    pub fn new(gateway: RequestGateway) -> Self {
        Self {
            uploads: UploadChannel::new(gateway.clone()),
            gateway,
        }
    }

    /// `GET /content/page`; filters travel as query parameters.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn page(&self, request: &PageRequest) -> RequestResult<Value> {
        self.gateway
            .get("/content/page", Some(request.to_value()))
            .await
    }

    /// `GET /content/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn get_by_id(&self, id: ContentId) -> RequestResult<Value> {
        self.gateway.get(&format!("/content/{id}"), None).await
    }

    /// `POST /content/create`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn create(&self, content: Value) -> RequestResult<Value> {
        self.gateway.post("/content/create", Some(content)).await
    }

    /// `PUT /content/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn update(&self, id: ContentId, changes: Value) -> RequestResult<Value> {
        self.gateway
            .put(&format!("/content/{id}"), Some(changes))
            .await
    }

    /// `DELETE /content/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn delete(&self, id: ContentId) -> RequestResult<Value> {
        self.gateway.delete(&format!("/content/{id}"), None).await
    }

    /// `GET /content/{id}/tags`
    ///
    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn tags(&self, id: ContentId) -> RequestResult<Value> {
        self.gateway.get(&format!("/content/{id}/tags"), None).await
    }

    /// Uploads one image to `/content/upload-images` as multipart form data.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Upload` on failure.
    pub async fn upload_image(&self, file_path: impl Into<PathBuf>) -> RequestResult<Value> {
        self.uploads
            .upload(
                "/content/upload-images",
                file_path,
                Some(CONTENT_IMAGE_FIELD),
                Map::new(),
                &RequestOptions::default(),
            )
            .await
    }
}
