//! RiverChart Domain - Core client types
//!
//! This crate defines the data model shared by the request/session layer
//! of the RiverChart content client. All types here are pure Rust with no
//! I/O dependencies.

pub mod collection;
pub mod error;
pub mod id;
pub mod media;
pub mod page;
pub mod request;
pub mod response;
pub mod session;
pub mod settings;

pub use collection::{CollectionMembership, CollectionRecord};
pub use error::{DomainError, DomainResult};
pub use id::{ContentId, UserId};
pub use media::full_image_url;
pub use page::{PageRequest, decode_records, extract_records};
pub use request::{
    DEFAULT_TIMEOUT_MS, DEFAULT_UPLOAD_FIELD, FileUpload, Header, Headers, HttpMethod,
    JSON_CONTENT_TYPE, RequestDescriptor, RequestOptions,
};
pub use response::{ResponseEnvelope, TransportResponse};
pub use session::{PersistedSession, Session, token_preview};
pub use settings::ClientSettings;
