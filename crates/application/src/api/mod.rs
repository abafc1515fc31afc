//! Typed wrappers over the backend endpoints.
//!
//! Each wrapper is a thin, cloneable handle over the [`RequestGateway`];
//! paths are fixed by the backend contract.
//!
//! [`RequestGateway`]: crate::gateway::RequestGateway

mod browse_history;
mod category;
mod collection;
mod content;
mod tag;
mod user;

pub use browse_history::BrowseHistoryApi;
pub use category::{CategoryApi, CategoryLevel};
pub use collection::CollectionApi;
pub use content::{CONTENT_IMAGE_FIELD, ContentApi};
pub use tag::TagApi;
pub use user::UserApi;
