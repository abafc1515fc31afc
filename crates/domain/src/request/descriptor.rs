//! Per-call request descriptor

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;
use uuid::Uuid;

use super::{Headers, HttpMethod, RequestOptions};

/// Default per-call timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Content type attached to every request unless the caller overrides it.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Complete description of one outbound call.
///
/// Built per call, handed to the transport once and then dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Correlation id used in log output.
    pub id: Uuid,
    /// Target URL, absolute once the gateway has resolved it.
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// HTTP headers
    pub headers: Headers,
    /// JSON payload; sent as query parameters for GET.
    pub body: Value,
    /// Timeout enforced by the transport.
    pub timeout_ms: u64,
    /// Whether the gateway drives a loading indicator for this call.
    pub show_loading: bool,
}

impl RequestDescriptor {
    /// Creates a descriptor with the default options: empty object body,
    /// JSON content type, 10 second timeout and a loading indicator.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        let mut headers = Headers::new();
        headers.set("Content-Type", JSON_CONTENT_TYPE);
        Self {
            id: Uuid::now_v7(),
            url: url.into(),
            method,
            headers,
            body: Value::Object(Map::new()),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            show_loading: true,
        }
    }

    /// Replaces the payload.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Merges caller options over the current values.
    #[must_use]
    pub fn with_options(mut self, options: &RequestOptions) -> Self {
        self.headers.merge(&options.headers);
        if let Some(timeout_ms) = options.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(show_loading) = options.show_loading {
            self.show_loading = show_loading;
        }
        self
    }

    /// Returns true if `url` is already an absolute http(s) URL.
    #[must_use]
    pub fn is_absolute_url(url: &str) -> bool {
        Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
    }

    /// Joins a relative path onto `base_url`; absolute URLs pass through unchanged.
    #[must_use]
    pub fn resolve_url(base_url: &str, url: &str) -> String {
        if Self::is_absolute_url(url) {
            return url.to_string();
        }
        let base = base_url.trim_end_matches('/');
        if url.starts_with('/') {
            format!("{base}{url}")
        } else {
            format!("{base}/{url}")
        }
    }

    /// Flattens the top-level members of an object payload into query pairs.
    ///
    /// Nulls are skipped; strings are sent verbatim and every other value
    /// in its JSON text form.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let Value::Object(map) = &self.body else {
            return Vec::new();
        };
        map.iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect()
    }
}
