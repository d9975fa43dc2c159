//! Raw failure values as they arrive from the HTTP layer or application code.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anything caught from a failed operation, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFailure {
    /// The request was sent but no response came back (offline, timeout,
    /// DNS failure, connection reset).
    NoResponse {
        /// Transport-level reason, for logs only
        reason: Option<String>,
    },
    /// The backend answered with a non-success status.
    Http {
        /// HTTP status code
        status: u16,
        /// Parsed response body, if one was sent
        body: Option<ResponseBody>,
    },
    /// A non-HTTP error carrying a message.
    Exception {
        /// Error message
        message: String,
    },
    /// A value of unknown shape.
    Unrecognized(Value),
}

impl RawFailure {
    /// Failure without a response.
    #[must_use]
    pub fn no_response(reason: impl Into<String>) -> Self {
        Self::NoResponse {
            reason: Some(reason.into()),
        }
    }

    /// Failure with a status and an optional body.
    #[must_use]
    pub fn http(status: u16, body: Option<ResponseBody>) -> Self {
        Self::Http { status, body }
    }

    /// Generic exception with a message.
    #[must_use]
    pub fn exception(message: impl Into<String>) -> Self {
        Self::Exception {
            message: message.into(),
        }
    }

    /// Interpret a duck-typed failure value.
    ///
    /// Accepted shapes:
    /// - `{ "hasResponse": false, ... }`: no response
    /// - `{ "hasResponse": true, "status": 404, "body": { ... } }`: HTTP failure
    /// - `{ "message": "..." }` without `hasResponse`: exception
    ///
    /// Anything else, including `hasResponse: true` with a missing or
    /// out-of-range status, is kept as [`RawFailure::Unrecognized`].
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Unrecognized(value);
        };

        match object.get("hasResponse").and_then(Value::as_bool) {
            Some(false) => Self::NoResponse {
                reason: object
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            Some(true) => {
                let status = object
                    .get("status")
                    .and_then(Value::as_u64)
                    .and_then(|s| u16::try_from(s).ok());
                match status {
                    Some(status) => Self::Http {
                        status,
                        body: object.get("body").map(ResponseBody::from_value),
                    },
                    None => Self::Unrecognized(value),
                }
            }
            None => match object.get("message").and_then(Value::as_str) {
                Some(message) => Self::exception(message),
                None => Self::Unrecognized(value),
            },
        }
    }
}

/// The structured error body the backend sends with failures:
/// `{ "message": string, "data": unknown }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// Server-provided message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Extra payload; a field-keyed object for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseBody {
    /// Lenient parse of a body value. Non-object bodies (HTML error pages,
    /// plain strings) and non-string messages yield empty fields.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            message: object
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            data: object.get("data").filter(|d| !d.is_null()).cloned(),
        }
    }

    /// Lenient parse of raw response bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice::<Value>(bytes)
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    /// The server message, if it carries any visible text.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}
