//! Multipart file upload.

use std::path::PathBuf;

use riverchart_domain::{
    DEFAULT_UPLOAD_FIELD, FileUpload, Headers, RequestDescriptor, RequestOptions,
};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::{LoadingGuard, RequestGateway};
use crate::error::{RequestError, RequestResult, TransportError};
use crate::messages;
use crate::ports::ToastKind;

/// Sends local files to the backend as multipart form data.
///
/// Shares identity headers and token resolution with the [`RequestGateway`]
/// it wraps. The response body is returned whole; no envelope check.
#[derive(Clone)]
pub struct UploadChannel {
    gateway: RequestGateway,
}

impl UploadChannel {
    /// Creates an upload channel on top of a gateway.
    #[must_use]
    pub const fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    /// Uploads one file.
    ///
    /// `field_name` defaults to `file`. On a 200 response the body is
    /// parsed as JSON, falling back to the raw text.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::Upload` on a transport failure or a non-200
    /// status.
    pub async fn upload(
        &self,
        url: &str,
        file_path: impl Into<PathBuf>,
        field_name: Option<&str>,
        extra_fields: Map<String, Value>,
        options: &RequestOptions,
    ) -> RequestResult<Value> {
        let settings = self.gateway.settings();
        let mut headers = Headers::new();
        headers.merge(&options.headers);
        self.gateway.apply_identity(&mut headers).await;

        let upload = FileUpload {
            url: RequestDescriptor::resolve_url(&settings.api_base_url, url),
            file_path: file_path.into(),
            field_name: field_name.unwrap_or(DEFAULT_UPLOAD_FIELD).to_string(),
            extra_fields,
            headers,
            timeout_ms: options.timeout_ms.unwrap_or(settings.timeout_ms),
        };
        debug!(
            url = %upload.url,
            file = %upload.file_path.display(),
            field = %upload.field_name,
            "uploading file"
        );

        let guard = options.show_loading.unwrap_or(true).then(|| {
            LoadingGuard::show(
                self.gateway.feedback().clone(),
                options.loading_title.as_deref().unwrap_or(messages::UPLOADING),
            )
        });
        let result = self.gateway.transport().send_file(&upload).await;
        drop(guard);

        let failure = match result {
            Ok(response) if response.is_ok() => {
                return Ok(serde_json::from_str(&response.body)
                    .unwrap_or(Value::String(response.body)));
            }
            Ok(response) => {
                warn!(url = %upload.url, status = response.status_code, "upload rejected");
                TransportError::Status(response.status_code)
            }
            Err(err) => {
                error!(url = %upload.url, error = %err, "upload failed");
                err
            }
        };
        self.gateway
            .feedback()
            .toast(messages::UPLOAD_FAILURE, ToastKind::Plain);
        Err(RequestError::Upload(failure))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::Harness;
    use pretty_assertions::assert_eq;
    use riverchart_domain::TransportResponse;
    use serde_json::json;

    #[tokio::test]
    async fn test_upload_returns_parsed_body() {
        let harness = Harness::new();
        harness.sign_in(3, "tok").await;
        harness
            .transport
            .push(Ok(TransportResponse::new(200, r#"{"url":"/img/a.png"}"#)));
        let mut extra = Map::new();
        extra.insert("type".to_string(), json!("avatar"));

        let data = harness
            .uploads
            .upload(
                "/file/upload",
                "/tmp/a.png",
                None,
                extra,
                &RequestOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(data, json!({"url": "/img/a.png"}));
        let sent = harness.transport.uploads();
        assert_eq!(sent[0].url, "http://localhost:8080/file/upload");
        assert_eq!(sent[0].field_name, "file");
        assert_eq!(sent[0].headers.get("Authorization"), Some("Bearer tok"));
        assert_eq!(sent[0].text_fields(), vec![("type".to_string(), "avatar".to_string())]);
        assert_eq!(harness.feedback.titles(), vec![messages::UPLOADING.to_string()]);
        assert_eq!(harness.feedback.hidden(), 1);
    }

    #[tokio::test]
    async fn test_plain_text_body_is_kept() {
        let harness = Harness::new();
        harness
            .transport
            .push(Ok(TransportResponse::new(200, "stored")));

        let data = harness
            .uploads
            .upload(
                "/file/upload",
                "a.png",
                Some("image"),
                Map::new(),
                &RequestOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(data, json!("stored"));
        assert_eq!(harness.transport.uploads()[0].field_name, "image");
    }

    #[tokio::test]
    async fn test_rejected_upload_toasts() {
        let harness = Harness::new();
        harness
            .transport
            .push(Ok(TransportResponse::new(413, "too large")));

        let err = harness
            .uploads
            .upload(
                "/file/upload",
                "a.png",
                None,
                Map::new(),
                &RequestOptions::default(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, RequestError::Upload(TransportError::Status(413)));
        assert_eq!(
            harness.feedback.toasts(),
            vec![(messages::UPLOAD_FAILURE.to_string(), ToastKind::Plain)]
        );
        assert_eq!(harness.feedback.shown(), harness.feedback.hidden());
    }
}
