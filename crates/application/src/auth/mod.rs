//! Session storage and token resolution.
//!
//! This module provides:
//! - The process-scoped in-memory session slot
//! - The persisted session record in the key-value store
//! - Token resolution across both tiers

mod slot;
mod token_store;
mod vault;

pub use slot::SessionSlot;
pub use token_store::TokenStore;
pub use vault::{LEGACY_KEYS, SESSION_KEY, SessionVault};
