//! The normalized error record produced by classification.

use crate::validation::ValidationErrors;
use serde::Serialize;
use std::fmt;

/// Error taxonomy shared by every surface of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No response from the server
    Network,
    /// 401 or 403
    Auth,
    /// 400 with per-field errors
    Validation,
    /// Rejected operation or application-level exception
    Business,
    /// Server failures, unexpected statuses and unknown values
    Unknown,
}

impl ErrorKind {
    /// Stable lowercase tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Auth => "auth",
            Self::Validation => "validation",
            Self::Business => "business",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified failure, ready for display.
///
/// Only the classifier constructs these; fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedError {
    kind: ErrorKind,
    title: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_errors: Option<ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
}

impl ProcessedError {
    pub(crate) fn new(
        kind: ErrorKind,
        title: impl Into<String>,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            validation_errors: None,
            status_code,
        }
    }

    pub(crate) fn with_validation_errors(mut self, errors: ValidationErrors) -> Self {
        self.validation_errors = Some(errors);
        self
    }

    /// Taxonomy tag.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Short category label.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Detail message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Per-field errors; only set for [`ErrorKind::Validation`].
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        self.validation_errors.as_ref()
    }

    /// HTTP status, when the failure came from a response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

impl fmt::Display for ProcessedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

impl std::error::Error for ProcessedError {}
