//! Network transport using reqwest.
//!
//! Implements the `NetworkTransport` port. JSON calls carry the descriptor
//! body as JSON, except GET which flattens it into the query string.
//! Uploads are sent as multipart form data.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};
use riverchart_application::{NetworkTransport, TransportError};
use riverchart_domain::{FileUpload, Headers, HttpMethod, RequestDescriptor, TransportResponse};
use tracing::debug;
use url::Url;

/// reqwest-backed transport.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default client.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("RiverChart/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn parse_url(url: &str) -> Result<Url, TransportError> {
        Url::parse(url).map_err(|e| TransportError::InvalidRequest(format!("{e}: {url}")))
    }

    /// Appends `pairs` to the URL's query string.
    fn with_query(mut url: Url, pairs: &[(String, String)]) -> Result<Url, TransportError> {
        if pairs.is_empty() {
            return Ok(url);
        }
        let encoded = serde_urlencoded::to_string(pairs)
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => format!("{existing}&{encoded}"),
            _ => encoded,
        };
        url.set_query(Some(&query));
        Ok(url)
    }

    fn apply_headers(
        mut builder: reqwest::RequestBuilder,
        headers: &Headers,
        skip_content_type: bool,
    ) -> reqwest::RequestBuilder {
        for header in headers.iter() {
            if skip_content_type && header.name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            builder = builder.header(&header.name, &header.value);
        }
        builder
    }

    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_builder() {
            return TransportError::InvalidRequest(error.to_string());
        }
        if error.is_connect() {
            return TransportError::Network(format!("connection failed: {error}"));
        }
        TransportError::Network(error.to_string())
    }

    async fn read_response(
        response: reqwest::Response,
        timeout_ms: u64,
    ) -> Result<TransportResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;
        Ok(TransportResponse::new(status, body))
    }

    async fn build_form(upload: &FileUpload) -> Result<Form, TransportError> {
        let bytes = tokio::fs::read(&upload.file_path)
            .await
            .map_err(|e| TransportError::Io(format!("{}: {e}", upload.file_path.display())))?;
        let mime_type: mime::Mime =
            mime_guess::from_path(&upload.file_path).first_or_octet_stream();

        let part = Part::bytes(bytes)
            .file_name(upload.file_name())
            .mime_str(mime_type.essence_str())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let form = upload
            .text_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        Ok(form.part(upload.field_name.clone(), part))
    }
}

#[async_trait]
impl NetworkTransport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        let mut url = Self::parse_url(&request.url)?;
        if request.method.sends_query() {
            url = Self::with_query(url, &request.query_pairs())?;
        }

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(request.timeout_ms));
        builder = Self::apply_headers(builder, &request.headers, false);

        if !request.method.sends_query() {
            let body = serde_json::to_vec(&request.body)
                .map_err(|e| TransportError::InvalidRequest(format!("Invalid JSON: {e}")))?;
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, request.timeout_ms))?;
        debug!(request_id = %request.id, status = response.status().as_u16(), "response received");

        Self::read_response(response, request.timeout_ms).await
    }

    async fn send_file(&self, upload: &FileUpload) -> Result<TransportResponse, TransportError> {
        let url = Self::parse_url(&upload.url)?;
        let form = Self::build_form(upload).await?;

        let mut builder = self
            .client
            .post(url)
            .timeout(Duration::from_millis(upload.timeout_ms));
        builder = Self::apply_headers(builder, &upload.headers, true);

        let response = builder
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::map_error(&e, upload.timeout_ms))?;

        Self::read_response(response, upload.timeout_ms).await
    }
}
