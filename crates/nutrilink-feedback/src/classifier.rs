//! Mapping from raw failures to [`ProcessedError`] values.
//!
//! Classification is total and side-effect free apart from `debug` logs.
//! Rules are checked in order and the first match wins:
//!
//! | Input                                   | Kind         | Message source          |
//! |-----------------------------------------|--------------|-------------------------|
//! | no response                             | `network`    | fixed                   |
//! | 401                                     | `auth`       | server, else default    |
//! | 403                                     | `auth`       | server, else default    |
//! | 400 + non-empty field map in `data`     | `validation` | server, else default    |
//! | 400 otherwise                           | `business`   | server, else default    |
//! | >= 500                                  | `unknown`    | fixed, server hidden    |
//! | other status                            | `unknown`    | server, else `Error N`  |
//! | exception with a message                | `business`   | exception message       |
//! | anything else                           | `unknown`    | fixed                   |

use crate::failure::{RawFailure, ResponseBody};
use crate::messages::{catalog, Catalog};
use crate::processed::{ErrorKind, ProcessedError};
use crate::validation::ValidationErrors;
use nutrilink_core::Locale;
use tracing::debug;

/// Classifies failures using the strings of one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorClassifier {
    locale: Locale,
}

impl ErrorClassifier {
    /// Create a classifier for a locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Locale used for titles and default messages.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Classify a failure. Never fails.
    #[must_use]
    pub fn classify(&self, failure: &RawFailure) -> ProcessedError {
        let strings = catalog(self.locale);

        let processed = match failure {
            RawFailure::NoResponse { reason } => {
                debug!(reason = ?reason, "request produced no response");
                ProcessedError::new(
                    ErrorKind::Network,
                    strings.network_title,
                    strings.network_message,
                    None,
                )
            }
            RawFailure::Http { status, body } => classify_http(strings, *status, body.as_ref()),
            RawFailure::Exception { message } if !message.trim().is_empty() => {
                ProcessedError::new(
                    ErrorKind::Business,
                    strings.exception_title,
                    message.clone(),
                    None,
                )
            }
            RawFailure::Exception { .. } | RawFailure::Unrecognized(_) => ProcessedError::new(
                ErrorKind::Unknown,
                strings.unknown_title,
                strings.unknown_message,
                None,
            ),
        };

        debug!(
            kind = %processed.kind(),
            status = ?processed.status_code(),
            "classified failure"
        );
        processed
    }
}

fn classify_http(strings: &Catalog, status: u16, body: Option<&ResponseBody>) -> ProcessedError {
    let server_message = body.and_then(ResponseBody::server_message);
    let message_or = |default: &str| server_message.unwrap_or(default).to_string();

    match status {
        401 => ProcessedError::new(
            ErrorKind::Auth,
            strings.unauthorized_title,
            message_or(strings.unauthorized_message),
            Some(status),
        ),
        403 => ProcessedError::new(
            ErrorKind::Auth,
            strings.forbidden_title,
            message_or(strings.forbidden_message),
            Some(status),
        ),
        400 => {
            let field_errors = body
                .and_then(|b| b.data.as_ref())
                .and_then(ValidationErrors::from_payload);
            match field_errors {
                Some(errors) => ProcessedError::new(
                    ErrorKind::Validation,
                    strings.validation_title,
                    message_or(strings.validation_message),
                    Some(status),
                )
                .with_validation_errors(errors),
                None => ProcessedError::new(
                    ErrorKind::Business,
                    strings.bad_request_title,
                    message_or(strings.bad_request_message),
                    Some(status),
                ),
            }
        }
        500.. => {
            if let Some(hidden) = server_message {
                debug!(status, server_message = hidden, "withholding server error message");
            }
            ProcessedError::new(
                ErrorKind::Unknown,
                strings.server_title,
                strings.server_message,
                Some(status),
            )
        }
        _ => ProcessedError::new(
            ErrorKind::Unknown,
            strings.request_title,
            server_message.map_or_else(|| strings.status_fallback(status), str::to_string),
            Some(status),
        ),
    }
}

/// Classify with the default (English) classifier.
#[must_use]
pub fn classify(failure: &RawFailure) -> ProcessedError {
    ErrorClassifier::default().classify(failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http(status: u16, body: serde_json::Value) -> RawFailure {
        RawFailure::http(status, Some(ResponseBody::from_value(&body)))
    }

    #[test]
    fn test_no_response_is_network() {
        let err = classify(&RawFailure::no_response("connection refused"));
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.title(), "Connection Error");
        assert_eq!(err.status_code(), None);
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn test_unauthorized() {
        let err = classify(&RawFailure::http(401, None));
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.title(), "Authentication Error");
        assert_eq!(
            err.message(),
            "Invalid credentials or expired session. Please sign in again."
        );
        assert_eq!(err.status_code(), Some(401));

        let err = classify(&http(401, json!({ "message": "Token expired" })));
        assert_eq!(err.message(), "Token expired");
    }

    #[test]
    fn test_unauthorized_ignores_validation_payload() {
        let err = classify(&http(
            401,
            json!({ "message": "nope", "data": { "email": "unknown" } }),
        ));
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn test_forbidden() {
        let err = classify(&http(403, json!({})));
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.title(), "Access Denied");
        assert_eq!(
            err.message(),
            "You do not have permission to perform this action."
        );
        assert_eq!(err.status_code(), Some(403));
    }

    #[test]
    fn test_bad_request_with_field_errors() {
        let err = classify(&http(
            400,
            json!({ "data": { "email": "Invalid format", "name": 3 } }),
        ));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.title(), "Invalid Data");
        assert_eq!(err.message(), "Please correct the highlighted fields.");
        let fields = err.validation_errors().expect("validation errors");
        assert_eq!(fields.get("email"), Some("Invalid format"));
        assert_eq!(fields.get("name"), Some("3"));
    }

    #[test]
    fn test_bad_request_with_empty_data_is_business() {
        let err = classify(&http(400, json!({ "message": "Slug taken", "data": {} })));
        assert_eq!(err.kind(), ErrorKind::Business);
        assert_eq!(err.title(), "Operation Error");
        assert_eq!(err.message(), "Slug taken");
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn test_bad_request_without_body() {
        let err = classify(&RawFailure::http(400, None));
        assert_eq!(err.kind(), ErrorKind::Business);
        assert_eq!(err.message(), "Invalid input data.");
        assert_eq!(err.status_code(), Some(400));
    }

    #[test]
    fn test_server_errors_hide_message() {
        for status in [500, 502, 503, 599] {
            let err = classify(&http(status, json!({ "message": "db down at 10.0.0.7" })));
            assert_eq!(err.kind(), ErrorKind::Unknown);
            assert_eq!(err.title(), "Internal Error");
            assert_eq!(
                err.message(),
                "An internal server error occurred. Please try again later."
            );
            assert!(!err.message().contains("db down"));
            assert_eq!(err.status_code(), Some(status));
        }
    }

    #[test]
    fn test_other_status() {
        let err = classify(&http(404, json!({ "message": "Page not found" })));
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.title(), "Request Error");
        assert_eq!(err.message(), "Page not found");
        assert_eq!(err.status_code(), Some(404));

        let err = classify(&RawFailure::http(409, None));
        assert_eq!(err.message(), "Error 409");

        let err = classify(&http(429, json!({ "message": "" })));
        assert_eq!(err.message(), "Error 429");
    }

    #[test]
    fn test_exception() {
        let err = classify(&RawFailure::exception("Could not read the PDF"));
        assert_eq!(err.kind(), ErrorKind::Business);
        assert_eq!(err.title(), "Error");
        assert_eq!(err.message(), "Could not read the PDF");
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_blank_exception_is_unknown() {
        let err = classify(&RawFailure::exception("  "));
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.title(), "Unknown Error");
    }

    #[test]
    fn test_unrecognized() {
        let err = classify(&RawFailure::Unrecognized(json!([1, 2, 3])));
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.title(), "Unknown Error");
        assert_eq!(err.message(), "An unexpected error occurred.");
    }

    #[test]
    fn test_localized_strings() {
        let classifier = ErrorClassifier::new(Locale::PtBr);
        let err = classifier.classify(&RawFailure::http(403, None));
        assert_eq!(err.title(), "Acesso Negado");

        let err = classifier.classify(&RawFailure::http(418, None));
        assert_eq!(err.message(), "Erro 418");
    }
}
