//! Client-side caches derived from server state.

mod category;
mod collection;

pub use category::CategoryCache;
pub use collection::{CollectionCache, MIN_RESYNC_PERIOD};
