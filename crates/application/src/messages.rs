//! User-visible feedback text

/// Loading indicator text for ordinary calls.
pub const LOADING: &str = "Loading...";

/// Loading indicator text for uploads.
pub const UPLOADING: &str = "Uploading...";

/// Toast shown when the network exchange itself failed.
pub const NETWORK_FAILURE: &str = "Network request failed";

/// Toast shown when an upload failed.
pub const UPLOAD_FAILURE: &str = "Upload failed";

/// Toast shown when a mutation needs a logged-in user.
pub const LOGIN_REQUIRED: &str = "Please log in first";

/// Toast confirming a collected item.
pub const COLLECTED: &str = "Added to collection";

/// Toast confirming a removed item.
pub const UNCOLLECTED: &str = "Removed from collection";

/// Toast shown for a non-200 status.
#[must_use]
pub fn http_failure(status: u16) -> String {
    format!("Request failed: {status}")
}
