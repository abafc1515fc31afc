//! JSON request gateway.
//!
//! One call is one attempt: build the descriptor, attach identity and auth
//! headers, dispatch, then normalize the outcome into data or a
//! [`RequestError`]. Every failure path toasts before returning.

use std::sync::Arc;

use riverchart_domain::{
    ClientSettings, Headers, HttpMethod, RequestDescriptor, RequestOptions, ResponseEnvelope,
    TransportResponse, token_preview,
};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use super::{
    AUTHORIZATION_HEADER, CLIENT_TYPE_HEADER, CLIENT_VERSION_HEADER, LoadingGuard,
    TUNNEL_BYPASS_HEADER,
};
use crate::auth::TokenStore;
use crate::error::{RequestError, RequestResult, TransportError};
use crate::messages;
use crate::ports::{NetworkTransport, ToastKind, UserFeedback};

/// Builds, dispatches and normalizes backend calls.
///
/// Cheap to clone; clones share the transport, feedback and token store.
#[derive(Clone)]
pub struct RequestGateway {
    settings: Arc<ClientSettings>,
    transport: Arc<dyn NetworkTransport>,
    feedback: Arc<dyn UserFeedback>,
    tokens: TokenStore,
}

impl RequestGateway {
    /// Creates a gateway.
    #[must_use]
    pub fn new(
        settings: ClientSettings,
        transport: Arc<dyn NetworkTransport>,
        feedback: Arc<dyn UserFeedback>,
        tokens: TokenStore,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            transport,
            feedback,
            tokens,
        }
    }

    /// The settings this gateway was built with.
    #[must_use]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The token store consulted on every call.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub(crate) const fn transport(&self) -> &Arc<dyn NetworkTransport> {
        &self.transport
    }

    pub(crate) const fn feedback(&self) -> &Arc<dyn UserFeedback> {
        &self.feedback
    }

    /// Sends a GET; `query` members become query parameters.
    ///
    /// # Errors
    ///
    /// See [`RequestGateway::call`].
    pub async fn get(&self, url: &str, query: Option<Value>) -> RequestResult<Value> {
        self.call(HttpMethod::Get, url, query, &RequestOptions::default())
            .await
    }

    /// Sends a POST with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RequestGateway::call`].
    pub async fn post(&self, url: &str, body: Option<Value>) -> RequestResult<Value> {
        self.call(HttpMethod::Post, url, body, &RequestOptions::default())
            .await
    }

    /// Sends a PUT with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`RequestGateway::call`].
    pub async fn put(&self, url: &str, body: Option<Value>) -> RequestResult<Value> {
        self.call(HttpMethod::Put, url, body, &RequestOptions::default())
            .await
    }

    /// Sends a DELETE with an optional JSON body.
    ///
    /// # Errors
    ///
    /// See [`RequestGateway::call`].
    pub async fn delete(&self, url: &str, body: Option<Value>) -> RequestResult<Value> {
        self.call(HttpMethod::Delete, url, body, &RequestOptions::default())
            .await
    }

    /// Performs one backend call and returns the envelope's data.
    ///
    /// # Errors
    ///
    /// - `RequestError::Transport` if the network exchange failed or the
    ///   status was not 200
    /// - `RequestError::Business` if the envelope code signals failure
    pub async fn call(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> RequestResult<Value> {
        let mut request = RequestDescriptor::new(
            method,
            RequestDescriptor::resolve_url(&self.settings.api_base_url, url),
        )
        .with_body(body.unwrap_or_else(|| Value::Object(Map::new())));
        request.timeout_ms = self.settings.timeout_ms;
        let mut request = request.with_options(options);
        self.apply_identity(&mut request.headers).await;

        debug!(
            request_id = %request.id,
            method = %request.method,
            url = %request.url,
            "dispatching request"
        );

        let guard = request.show_loading.then(|| {
            LoadingGuard::show(
                self.feedback.clone(),
                options.loading_title.as_deref().unwrap_or(messages::LOADING),
            )
        });
        let result = self.transport.send(&request).await;
        drop(guard);

        match result {
            Ok(response) => self.normalize(&request, &response),
            Err(err) => {
                error!(
                    request_id = %request.id,
                    url = %request.url,
                    error = %err,
                    "request failed"
                );
                self.feedback.toast(messages::NETWORK_FAILURE, ToastKind::Plain);
                Err(err.into())
            }
        }
    }

    fn normalize(
        &self,
        request: &RequestDescriptor,
        response: &TransportResponse,
    ) -> RequestResult<Value> {
        if !response.is_ok() {
            warn!(
                request_id = %request.id,
                url = %request.url,
                status = response.status_code,
                "unexpected HTTP status"
            );
            self.feedback
                .toast(&messages::http_failure(response.status_code), ToastKind::Plain);
            return Err(TransportError::Status(response.status_code).into());
        }

        let envelope = ResponseEnvelope::from_body(&response.body);
        if envelope.is_success() {
            return Ok(envelope.data);
        }

        let message = envelope.failure_message();
        warn!(
            request_id = %request.id,
            url = %request.url,
            code = %envelope.code_label(),
            %message,
            "business failure"
        );
        self.feedback.toast(&message, ToastKind::Plain);
        Err(RequestError::Business {
            code: envelope.code_label(),
            message,
        })
    }

    /// Attaches the client-identity headers and, when a token resolves,
    /// the bearer authorization header.
    pub(crate) async fn apply_identity(&self, headers: &mut Headers) {
        headers.set(CLIENT_TYPE_HEADER, self.settings.client_type.as_str());
        headers.set(CLIENT_VERSION_HEADER, self.settings.client_version.as_str());
        if self.settings.tunnel_bypass {
            headers.set(TUNNEL_BYPASS_HEADER, "1");
        }

        match self.tokens.resolve_token().await {
            Some(token) => {
                debug!(token = %token_preview(&token), "authorization header added");
                headers.set(AUTHORIZATION_HEADER, format!("Bearer {token}"));
            }
            None => warn!("no token available"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{Harness, json_response};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_success_returns_envelope_data() {
        let harness = Harness::new();
        harness
            .transport
            .push(json_response(200, &json!({"code": 200, "data": {"id": 7}})));

        let data = harness.gateway.get("/content/7", None).await.unwrap();

        assert_eq!(data, json!({"id": 7}));
        assert_eq!(harness.feedback.shown(), 1);
        assert_eq!(harness.feedback.hidden(), 1);
        assert!(harness.feedback.toasts().is_empty());

        let sent = harness.transport.requests();
        assert_eq!(sent[0].url, "http://localhost:8080/content/7");
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].timeout_ms, 10_000);
    }

    #[tokio::test]
    async fn test_identity_headers_without_token() {
        let harness = Harness::new();
        harness.gateway.post("/tag/query", None).await.unwrap();

        let headers = &harness.transport.requests()[0].headers;
        assert_eq!(
            headers.get(CLIENT_TYPE_HEADER),
            Some("RiverChartLuoWrit-MiniProgram")
        );
        assert_eq!(headers.get(CLIENT_VERSION_HEADER), Some("1.0.0"));
        assert_eq!(headers.get(TUNNEL_BYPASS_HEADER), Some("1"));
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert_eq!(headers.get(AUTHORIZATION_HEADER), None);
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let harness = Harness::new();
        harness.sign_in(42, "t1").await;

        harness.gateway.get("/content/7", None).await.unwrap();

        let headers = &harness.transport.requests()[0].headers;
        assert_eq!(headers.get(AUTHORIZATION_HEADER), Some("Bearer t1"));
    }

    #[tokio::test]
    async fn test_non_200_is_transport_error() {
        let harness = Harness::new();
        harness.transport.push(Ok(TransportResponse::new(500, "oops")));

        let err = harness.gateway.get("/content/7", None).await.unwrap_err();

        assert_eq!(err, RequestError::Transport(TransportError::Status(500)));
        assert_eq!(harness.feedback.shown(), 1);
        assert_eq!(harness.feedback.hidden(), 1);
        assert_eq!(
            harness.feedback.toasts(),
            vec![("Request failed: 500".to_string(), ToastKind::Plain)]
        );
    }

    #[tokio::test]
    async fn test_business_failure_carries_message() {
        let harness = Harness::new();
        harness.transport.push(json_response(
            200,
            &json!({"code": 4001, "message": "tag already exists"}),
        ));

        let err = harness.gateway.post("/tag/create", None).await.unwrap_err();

        assert_eq!(
            err,
            RequestError::Business {
                code: "4001".to_string(),
                message: "tag already exists".to_string(),
            }
        );
        assert!(err.is_business());
        assert_eq!(harness.feedback.hidden(), 1);
        assert_eq!(harness.feedback.toasts()[0].0, "tag already exists");
    }

    #[tokio::test]
    async fn test_zero_code_is_success() {
        let harness = Harness::new();
        harness
            .transport
            .push(json_response(200, &json!({"code": 0, "data": [1]})));

        assert_eq!(
            harness.gateway.get("/tag/query", None).await.unwrap(),
            json!([1])
        );
    }

    #[tokio::test]
    async fn test_network_failure() {
        let harness = Harness::new();
        harness
            .transport
            .push(Err(TransportError::Timeout { timeout_ms: 10_000 }));

        let err = harness.gateway.get("/content/7", None).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(harness.feedback.shown(), harness.feedback.hidden());
        assert_eq!(
            harness.feedback.toasts(),
            vec![(messages::NETWORK_FAILURE.to_string(), ToastKind::Plain)]
        );
    }

    #[tokio::test]
    async fn test_silent_call_skips_indicator() {
        let harness = Harness::new();
        let options = RequestOptions::new().silent().with_timeout_ms(2_000);

        harness
            .gateway
            .call(HttpMethod::Put, "https://other.example.com/x", None, &options)
            .await
            .unwrap();

        assert_eq!(harness.feedback.shown(), 0);
        assert_eq!(harness.feedback.hidden(), 0);
        let sent = &harness.transport.requests()[0];
        assert_eq!(sent.url, "https://other.example.com/x");
        assert_eq!(sent.timeout_ms, 2_000);
        assert!(!sent.show_loading);
    }
}
