//! Presentation of classified errors through injected sinks.
//!
//! The presenter never owns UI state. Callers hand it a [`ToastSink`] and,
//! for forms, a [`FieldErrorSink`]; closures implement both traits.

use crate::classifier::ErrorClassifier;
use crate::failure::RawFailure;
use crate::fields::FieldNameTranslator;
use crate::messages::catalog;
use crate::processed::ProcessedError;
use crate::validation::ValidationErrors;
use nutrilink_core::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Visual variant of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    /// Error styling
    Destructive,
}

/// A transient notification as handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Headline
    pub title: String,
    /// Body text
    pub description: String,
    /// Styling; `None` is the neutral default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<ToastVariant>,
}

impl Toast {
    /// Toast with error styling.
    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Some(ToastVariant::Destructive),
        }
    }

    /// Toast with neutral styling.
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: None,
        }
    }
}

/// Receives toasts.
pub trait ToastSink {
    /// Display one toast.
    fn show(&mut self, toast: Toast);
}

impl<F> ToastSink for F
where
    F: FnMut(Toast),
{
    fn show(&mut self, toast: Toast) {
        self(toast);
    }
}

/// Receives per-field errors for a form.
pub trait FieldErrorSink {
    /// Set the errors of every field in `errors`, replacing what those fields
    /// showed before. Fields not mentioned are left alone.
    fn set_field_errors(&mut self, errors: &ValidationErrors);
}

impl<F> FieldErrorSink for F
where
    F: FnMut(&ValidationErrors),
{
    fn set_field_errors(&mut self, errors: &ValidationErrors) {
        self(errors);
    }
}

/// Field-error state of one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    /// Empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message currently shown for a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Clear one field, e.g. when the user edits it.
    pub fn clear_field(&mut self, field: &str) -> bool {
        self.0.remove(field).is_some()
    }

    /// Clear every field.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Whether no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(field, message)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FieldErrorSink for FormErrors {
    fn set_field_errors(&mut self, errors: &ValidationErrors) {
        for (field, message) in errors {
            self.0.insert(field.clone(), message.clone());
        }
    }
}

/// How a call to the presenter surfaced the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// A toast carrying the error's own title and message
    Toast,
    /// Field errors were set and a generic toast was shown
    FieldErrorsAndToast,
}

/// Classifies and presents failures in one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorPresenter {
    classifier: ErrorClassifier,
    translator: FieldNameTranslator,
}

impl ErrorPresenter {
    /// Presenter for a locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            classifier: ErrorClassifier::new(locale),
            translator: FieldNameTranslator::new(locale),
        }
    }

    /// The classifier used by [`handle`](Self::handle).
    #[must_use]
    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    /// The field label translator.
    #[must_use]
    pub fn translator(&self) -> &FieldNameTranslator {
        &self.translator
    }

    /// Show a classified error as a toast with its title and message.
    pub fn present<T>(&self, error: &ProcessedError, toasts: &mut T) -> Presentation
    where
        T: ToastSink + ?Sized,
    {
        debug!(kind = %error.kind(), "presenting error as toast");
        toasts.show(Toast::error(error.title(), error.message()));
        Presentation::Toast
    }

    /// Show a classified error in a form context.
    ///
    /// Validation errors go to `fields` and the toast carries the generic
    /// "correct the highlighted fields" text. Any other error behaves like
    /// [`present`](Self::present). Exactly one toast is shown either way.
    pub fn present_with_fields<T, F>(
        &self,
        error: &ProcessedError,
        toasts: &mut T,
        fields: &mut F,
    ) -> Presentation
    where
        T: ToastSink + ?Sized,
        F: FieldErrorSink + ?Sized,
    {
        let Some(errors) = error.validation_errors() else {
            return self.present(error, toasts);
        };

        debug!(fields = errors.len(), "presenting validation errors on form");
        fields.set_field_errors(errors);
        let strings = catalog(self.classifier.locale());
        toasts.show(Toast::error(error.title(), strings.validation_message));
        Presentation::FieldErrorsAndToast
    }

    /// Classify a failure and show it as a toast.
    pub fn handle<T>(&self, failure: &RawFailure, toasts: &mut T) -> ProcessedError
    where
        T: ToastSink + ?Sized,
    {
        let error = self.classifier.classify(failure);
        self.present(&error, toasts);
        error
    }

    /// Classify a failure and show it in a form context.
    pub fn handle_with_fields<T, F>(
        &self,
        failure: &RawFailure,
        toasts: &mut T,
        fields: &mut F,
    ) -> ProcessedError
    where
        T: ToastSink + ?Sized,
        F: FieldErrorSink + ?Sized,
    {
        let error = self.classifier.classify(failure);
        self.present_with_fields(&error, toasts, fields);
        error
    }

    /// Render validation errors as one string using this presenter's locale.
    #[must_use]
    pub fn format_validation_errors(&self, errors: &ValidationErrors) -> String {
        format_validation_errors(errors, &self.translator)
    }
}

/// Render validation errors as newline-separated `"{Label}: {message}"`
/// lines, ordered by field identifier.
#[must_use]
pub fn format_validation_errors(
    errors: &ValidationErrors,
    translator: &FieldNameTranslator,
) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {message}", translator.label(field)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::ResponseBody;
    use serde_json::json;

    fn validation_failure() -> RawFailure {
        RawFailure::http(
            400,
            Some(ResponseBody::from_value(&json!({
                "message": "Bad input",
                "data": { "email": "Invalid format", "name": "Too short" }
            }))),
        )
    }

    #[test]
    fn test_present_plain_error() {
        let presenter = ErrorPresenter::default();
        let error = presenter.classifier().classify(&RawFailure::http(403, None));

        let mut shown = Vec::new();
        let outcome = presenter.present(&error, &mut |t: Toast| shown.push(t));

        assert_eq!(outcome, Presentation::Toast);
        assert_eq!(
            shown,
            vec![Toast::error(
                "Access Denied",
                "You do not have permission to perform this action."
            )]
        );
    }

    #[test]
    fn test_validation_with_fields_sets_errors_and_generic_toast() {
        let presenter = ErrorPresenter::default();
        let mut shown = Vec::new();
        let mut form = FormErrors::new();

        let error =
            presenter.handle_with_fields(&validation_failure(), &mut |t: Toast| shown.push(t), &mut form);

        assert_eq!(error.message(), "Bad input");
        assert_eq!(form.get("email"), Some("Invalid format"));
        assert_eq!(form.get("name"), Some("Too short"));
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Invalid Data");
        assert_eq!(shown[0].description, "Please correct the highlighted fields.");
        assert_eq!(shown[0].variant, Some(ToastVariant::Destructive));
    }

    #[test]
    fn test_validation_without_fields_shows_message() {
        let presenter = ErrorPresenter::default();
        let mut shown = Vec::new();

        presenter.handle(&validation_failure(), &mut |t: Toast| shown.push(t));

        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].description, "Bad input");
    }

    #[test]
    fn test_non_validation_error_leaves_fields_alone() {
        let presenter = ErrorPresenter::default();
        let mut shown = Vec::new();
        let mut calls = 0;

        let outcome = presenter.present_with_fields(
            &presenter.classifier().classify(&RawFailure::no_response("timeout")),
            &mut |t: Toast| shown.push(t),
            &mut |_: &ValidationErrors| calls += 1,
        );

        assert_eq!(outcome, Presentation::Toast);
        assert_eq!(calls, 0);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Connection Error");
    }

    #[test]
    fn test_form_errors_replace_only_affected_fields() {
        let mut form = FormErrors::new();
        let first =
            ValidationErrors::from_payload(&json!({ "email": "taken", "bio": "too long" }))
                .expect("errors");
        let second =
            ValidationErrors::from_payload(&json!({ "email": "invalid" })).expect("errors");

        form.set_field_errors(&first);
        form.set_field_errors(&second);

        assert_eq!(form.get("email"), Some("invalid"));
        assert_eq!(form.get("bio"), Some("too long"));
        assert!(form.clear_field("bio"));
        assert!(!form.clear_field("bio"));
        form.clear();
        assert!(form.is_empty());
    }

    #[test]
    fn test_format_validation_errors() {
        let errors =
            ValidationErrors::from_payload(&json!({ "name": "too short", "email": "required" }))
                .expect("errors");

        let en = format_validation_errors(&errors, &FieldNameTranslator::new(Locale::En));
        assert_eq!(en, "Email: required\nName: too short");

        let pt = ErrorPresenter::new(Locale::PtBr).format_validation_errors(&errors);
        assert_eq!(pt, "E-mail: required\nNome: too short");
    }

    #[test]
    fn test_toast_serialization() {
        let value = serde_json::to_value(Toast::error("Error", "boom")).expect("serialize");
        assert_eq!(
            value,
            json!({ "title": "Error", "description": "boom", "variant": "destructive" })
        );

        let value = serde_json::to_value(Toast::info("Saved", "done")).expect("serialize");
        assert_eq!(value, json!({ "title": "Saved", "description": "done" }));
    }
}
