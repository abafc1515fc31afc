//! Key-value storage and settings persistence.

mod file_kv;
mod memory_kv;
mod settings_repository;

pub use file_kv::FileKvStore;
pub use memory_kv::InMemoryKv;
pub use settings_repository::{
    ENV_API_BASE_URL, ENV_CLIENT_VERSION, ENV_STORAGE_FILE, ENV_TIMEOUT_MS, SettingsError,
    SettingsRepository, apply_overrides,
};
