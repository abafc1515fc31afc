//! Client Settings Domain Model
//!
//! Connection and identity settings for the request layer.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::request::DEFAULT_TIMEOUT_MS;

/// Settings consumed by the request gateway and the caches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL prefixed to relative request paths.
    pub api_base_url: String,
    /// Value of the `X-Client-Type` header.
    pub client_type: String,
    /// Value of the `X-Client-Version` header.
    pub client_version: String,
    /// Whether to send the tunnel browser-warning bypass header.
    pub tunnel_bypass: bool,
    /// Default per-call timeout.
    pub timeout_ms: u64,
    /// Page size used to fetch "all" collected items.
    pub collection_page_size: u32,
    /// Page size used to fetch "all" main categories.
    pub category_page_size: u32,
    /// File backing the persistent key-value store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_file: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            client_type: "RiverChartLuoWrit-MiniProgram".to_string(),
            client_version: "1.0.0".to_string(),
            tunnel_bypass: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            collection_page_size: 1000,
            category_page_size: 100,
            storage_file: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{"api_base_url": "https://api.example.com"}"#).unwrap();
        assert_eq!(settings.api_base_url, "https://api.example.com");
        assert_eq!(settings.timeout_ms, 10_000);
        assert_eq!(settings.collection_page_size, 1000);
        assert!(settings.tunnel_bypass);
    }
}
