//! Inbound response types

mod envelope;
mod transport;

pub use envelope::{BUSINESS_FAILURE_FALLBACK, ResponseEnvelope, SUCCESS_CODES};
pub use transport::TransportResponse;
