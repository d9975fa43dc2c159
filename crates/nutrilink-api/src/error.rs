//! Error types for backend calls.

use nutrilink_feedback::{RawFailure, ResponseBody};
use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request got no response (connect failure, timeout, reset)
    #[error("no response from server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Leniently parsed error body, `None` when the body was empty
        body: Option<ResponseBody>,
    },

    /// A success body that does not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request URL could not be built
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// Parser message
        reason: String,
    },

    /// The HTTP client could not be created
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

impl ApiError {
    /// HTTP status, for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw failure for the classifier.
    ///
    /// Transport errors have no response; decode, URL and client errors are
    /// local failures and become exceptions carrying their message.
    #[must_use]
    pub fn to_raw_failure(&self) -> RawFailure {
        match self {
            Self::Transport(err) => RawFailure::no_response(err.to_string()),
            Self::Status { status, body } => RawFailure::http(*status, body.clone()),
            Self::Decode(_) | Self::InvalidUrl { .. } | Self::Client(_) => {
                RawFailure::exception(self.to_string())
            }
        }
    }
}

impl From<&ApiError> for RawFailure {
    fn from(err: &ApiError) -> Self {
        err.to_raw_failure()
    }
}

impl From<ApiError> for RawFailure {
    fn from(err: ApiError) -> Self {
        err.to_raw_failure()
    }
}

/// Result type alias for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;
