//! Network transport port

use async_trait::async_trait;
use riverchart_domain::{FileUpload, RequestDescriptor, TransportResponse};

use crate::error::TransportError;

/// Port for executing HTTP exchanges.
///
/// Implementations enforce the descriptor's timeout and report a timeout
/// as [`TransportError::Timeout`]. Any completed exchange, whatever its
/// status, is an `Ok`.
#[async_trait]
pub trait NetworkTransport: Send + Sync {
    /// Sends a request carrying a JSON body (or query parameters for GET).
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange could not be completed.
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError>;

    /// Sends a local file as multipart form data.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the exchange fails.
    async fn send_file(&self, upload: &FileUpload) -> Result<TransportResponse, TransportError>;
}
