//! Nutrilink Core - Foundation crate for the Nutrilink client.
//!
//! This crate provides shared types, error handling and configuration
//! management that the other Nutrilink crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`Locale`, `NotificationId`, `Timestamp`)
//!
//! # Example
//!
//! ```rust
//! use nutrilink_core::{AppConfig, Locale};
//!
//! let mut config = AppConfig::default();
//! config.apply_env_overrides(|key| {
//!     (key == "NUTRILINK_LOCALE").then(|| "pt-BR".to_string())
//! });
//! assert_eq!(config.general.locale, Locale::PtBr);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{ApiConfig, AppConfig, GeneralConfig, LoggingConfig, NotificationConfig};
pub use error::{ConfigError, ConfigResult, NutrilinkError, Result};
pub use types::{Locale, NotificationId, Timestamp};
