//! Settings persistence.
//!
//! Settings live in the platform-specific config directory unless a path is
//! given explicitly:
//! - Linux: ~/.config/ctxvar/settings.json
//! - macOS: ~/Library/Application Support/ctxvar/settings.json
//! - Windows: %APPDATA%/ctxvar/settings.json
//!
//! `CTXVAR_LOG` overrides the log level and `CTXVAR_WORKSPACE` adds
//! workspace roots (separated like `PATH`).

use std::env;
use std::path::PathBuf;

use ctxvar_domain::Settings;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable};

/// Environment variable overriding the log level.
pub const LOG_ENV: &str = "CTXVAR_LOG";
/// Environment variable adding workspace roots.
pub const WORKSPACE_ENV: &str = "CTXVAR_WORKSPACE";

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
}

/// Repository for settings persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository using the default settings location.
    #[must_use]
    pub const fn new() -> Self {
        Self { path: None }
    }

    /// Creates a repository reading a specific file.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the default settings file location, if available.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ctxvar").join("settings.json"))
    }

    /// Returns the file this repository reads and writes.
    #[must_use]
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(Self::default_path)
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if the file doesn't exist. Environment
    /// overrides are not applied; see [`Self::load_with_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let Some(path) = self.settings_path() else {
            return Ok(Settings::default());
        };

        if !fs::try_exists(&path).await.unwrap_or(false) {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read(&path).await?;
        let settings = from_json_bytes(&content)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Loads settings and applies `CTXVAR_LOG` and `CTXVAR_WORKSPACE`.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed.
    pub async fn load_with_env(&self) -> Result<Settings, SettingsError> {
        let mut settings = self.load().await?;
        apply_overrides(
            &mut settings,
            env::var(LOG_ENV).ok(),
            env::var_os(WORKSPACE_ENV),
        );
        Ok(settings)
    }

    /// Saves settings to disk, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is unknown or the file cannot be
    /// written.
    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let Some(path) = self.settings_path() else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable(settings)?;
        fs::write(&path, content).await?;
        Ok(())
    }
}

fn apply_overrides(
    settings: &mut Settings,
    log_level: Option<String>,
    workspace: Option<std::ffi::OsString>,
) {
    if let Some(level) = log_level.filter(|level| !level.trim().is_empty()) {
        settings.log_level = level;
    }
    if let Some(roots) = workspace {
        for root in env::split_paths(&roots).filter(|root| !root.as_os_str().is_empty()) {
            settings.add_workspace_root(&root);
        }
    }
}
