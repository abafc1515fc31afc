//! Outbound request types

mod descriptor;
mod header;
mod method;
mod options;
mod upload;

pub use descriptor::{DEFAULT_TIMEOUT_MS, JSON_CONTENT_TYPE, RequestDescriptor};
pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use options::RequestOptions;
pub use upload::{DEFAULT_UPLOAD_FIELD, FileUpload};
