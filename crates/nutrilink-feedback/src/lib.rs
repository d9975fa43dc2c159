//! Nutrilink Feedback - turning failures into something a user can act on.
//!
//! Every surface of the client funnels its failures through this crate:
//!
//! ```text
//! RawFailure ──► ErrorClassifier ──► ProcessedError ──► ErrorPresenter ──► ToastSink
//!                                                              │
//!                                                              └──► FieldErrorSink (forms)
//! ```
//!
//! Classification is pure and total: any input, however malformed, yields a
//! [`ProcessedError`]. Presentation always shows exactly one toast.
//!
//! # Example
//!
//! ```rust
//! use nutrilink_feedback::{ErrorKind, ErrorPresenter, FormErrors, RawFailure, Toast};
//! use serde_json::json;
//!
//! let failure = RawFailure::from_json(json!({
//!     "hasResponse": true,
//!     "status": 400,
//!     "body": { "message": "Bad input", "data": { "email": "Invalid format" } }
//! }));
//!
//! let presenter = ErrorPresenter::default();
//! let mut toasts: Vec<Toast> = Vec::new();
//! let mut form = FormErrors::new();
//! let error = presenter.handle_with_fields(&failure, &mut |t: Toast| toasts.push(t), &mut form);
//!
//! assert_eq!(error.kind(), ErrorKind::Validation);
//! assert_eq!(form.get("email"), Some("Invalid format"));
//! assert_eq!(toasts.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod classifier;
pub mod failure;
pub mod fields;
mod messages;
pub mod presenter;
pub mod processed;
pub mod validation;

// Re-export commonly used types
pub use classifier::{classify, ErrorClassifier};
pub use failure::{RawFailure, ResponseBody};
pub use fields::FieldNameTranslator;
pub use presenter::{
    format_validation_errors, ErrorPresenter, FieldErrorSink, FormErrors, Presentation, Toast,
    ToastSink, ToastVariant,
};
pub use processed::{ErrorKind, ProcessedError};
pub use validation::ValidationErrors;
