//! Configuration management for Nutrilink.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Locale;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main client configuration.
///
/// This is loaded from `~/.config/nutrilink/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General client settings
    pub general: GeneralConfig,
    /// Backend API settings
    pub api: ApiConfig,
    /// Notification polling settings
    pub notifications: NotificationConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults
    /// if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `NUTRILINK_API_URL`: Override the backend base URL
    /// - `NUTRILINK_LOCALE`: Override the display locale (`en`, `pt-BR`)
    /// - `NUTRILINK_POLL_INTERVAL_SECS`: Override the notification poll interval
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Unparseable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("NUTRILINK_API_URL") {
            tracing::debug!("Override api.base_url from env: {}", url);
            self.api.base_url = url;
        }

        if let Some(val) = lookup("NUTRILINK_LOCALE") {
            match val.parse() {
                Ok(locale) => {
                    self.general.locale = locale;
                    tracing::debug!("Override general.locale from env: {}", locale);
                }
                Err(e) => tracing::warn!("Ignoring NUTRILINK_LOCALE: {}", e),
            }
        }

        if let Some(val) = lookup("NUTRILINK_POLL_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                self.notifications.poll_interval_secs = secs;
                tracing::debug!("Override notifications.poll_interval_secs from env: {}", secs);
            }
        }
    }

    /// Check values that would make the client unusable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.notifications.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notifications.poll_interval_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to the default location.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/nutrilink/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "nutrilink", "nutrilink").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// General client settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Display locale for toasts and field labels
    pub locale: Locale,
}

/// Backend API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333/api".to_string(),
            timeout_secs: 30,
            user_agent: concat!("nutrilink-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Notification polling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Seconds between two notification fetches
    pub poll_interval_secs: u64,
    /// Maximum number of notifications requested per fetch
    pub page_size: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            page_size: 20,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,nutrilink=debug".to_string(),
        }
    }
}
