//! RiverChart Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod feedback;
pub mod persistence;
pub mod serialization;

pub use adapters::{ReqwestTransport, SystemClock};
pub use feedback::{LoggingNavigator, TracingFeedback};
pub use persistence::{
    FileKvStore, InMemoryKv, SettingsError, SettingsRepository, apply_overrides,
};
pub use serialization::{SerializationError, from_json, from_json_bytes, to_json_stable};
