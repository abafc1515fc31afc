//! Client settings persistence.
//!
//! Settings live in the platform-specific config directory:
//! - Linux: ~/.config/riverchart/settings.json
//! - macOS: ~/Library/Application Support/riverchart/settings.json
//! - Windows: %APPDATA%/riverchart/settings.json
//!
//! Environment variables override the file.

use std::path::PathBuf;

use riverchart_domain::ClientSettings;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable};

/// Overrides `api_base_url`.
pub const ENV_API_BASE_URL: &str = "RIVERCHART_API_BASE_URL";
/// Overrides `timeout_ms`.
pub const ENV_TIMEOUT_MS: &str = "RIVERCHART_TIMEOUT_MS";
/// Overrides `client_version`.
pub const ENV_CLIENT_VERSION: &str = "RIVERCHART_CLIENT_VERSION";
/// Overrides `storage_file`.
pub const ENV_STORAGE_FILE: &str = "RIVERCHART_STORAGE_FILE";

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// An environment override could not be parsed.
    #[error("invalid value for {name}: {value}")]
    InvalidOverride {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Loads and saves [`ClientSettings`].
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Repository at the default location.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Repository at an explicit file path.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Default settings file, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("riverchart").join("settings.json"))
    }

    /// Default location of the persisted key-value store.
    #[must_use]
    pub fn default_storage_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("riverchart").join("storage.json"))
    }

    /// The file this repository reads and writes.
    #[must_use]
    pub const fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Loads settings from disk. Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<ClientSettings, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(ClientSettings::default());
        };

        if !fs::try_exists(path).await? {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(ClientSettings::default());
        }

        let content = fs::read(path).await?;
        Ok(from_json_bytes(&content)?)
    }

    /// Loads settings from disk, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or an override is malformed.
    pub async fn load_with_env(&self) -> Result<ClientSettings, SettingsError> {
        let settings = self.load().await?;
        apply_overrides(settings, |name| std::env::var(name).ok())
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no target path or the write fails.
    pub async fn save(&self, settings: &ClientSettings) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, to_json_stable(settings)?).await?;
        Ok(())
    }
}

/// Applies overrides looked up by variable name.
///
/// # Errors
///
/// Returns `SettingsError::InvalidOverride` for a non-numeric timeout.
pub fn apply_overrides(
    mut settings: ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    if let Some(url) = lookup(ENV_API_BASE_URL) {
        settings.api_base_url = url;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        settings.timeout_ms = raw.trim().parse().map_err(|_| SettingsError::InvalidOverride {
            name: ENV_TIMEOUT_MS,
            value: raw.clone(),
        })?;
    }
    if let Some(version) = lookup(ENV_CLIENT_VERSION) {
        settings.client_version = version;
    }
    if let Some(file) = lookup(ENV_STORAGE_FILE) {
        settings.storage_file = Some(PathBuf::from(file));
    }
    Ok(settings)
}
