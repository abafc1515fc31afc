//! Multipart file upload descriptor

use std::path::PathBuf;

use serde_json::{Map, Value};

use super::Headers;

/// Form field name used for the file part when the caller gives none.
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// Everything the transport needs to send one file as multipart form data.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// Absolute target URL.
    pub url: String,
    /// Local path of the file to send.
    pub file_path: PathBuf,
    /// Form field carrying the file.
    pub field_name: String,
    /// Additional text fields sent alongside the file.
    pub extra_fields: Map<String, Value>,
    /// HTTP headers (client identity and auth).
    pub headers: Headers,
    /// Timeout enforced by the transport.
    pub timeout_ms: u64,
}

impl FileUpload {
    /// Renders the extra fields as text form values.
    #[must_use]
    pub fn text_fields(&self) -> Vec<(String, String)> {
        self.extra_fields
            .iter()
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

    /// Returns the file name sent with the file part.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map_or_else(|| DEFAULT_UPLOAD_FIELD.to_string(), |n| n.to_string_lossy().into_owned())
    }
}
