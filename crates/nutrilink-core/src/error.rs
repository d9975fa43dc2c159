//! Core error types for the Nutrilink client.
//!
//! Input validation and configuration errors shared by the client crates.
//! The error classifier in `nutrilink-feedback` is total and has no error
//! type of its own.

use thiserror::Error;

/// Central error type for Nutrilink client operations.
#[derive(Error, Debug)]
pub enum NutrilinkError {
    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `NutrilinkError`.
pub type Result<T> = std::result::Result<T, NutrilinkError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NutrilinkError::Validation("unsupported locale".to_string());
        assert_eq!(err.to_string(), "validation error: unsupported locale");

        let err = ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for api.base_url: must not be empty"
        );
    }
}
