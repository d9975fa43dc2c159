//! Field-level validation errors reported by the backend.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Non-empty mapping from field identifier to a single error message.
///
/// Keys are kept sorted so formatting and comparisons are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Build from an explicit map. Returns `None` for an empty map.
    #[must_use]
    pub fn new(errors: BTreeMap<String, String>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// Parse the `data` payload of a 400 response.
    ///
    /// Only a JSON object qualifies. Values are coerced to strings: arrays of
    /// messages are joined with `", "`, `null` entries are dropped and nested
    /// objects are kept as compact JSON. Returns `None` when nothing usable
    /// remains, so an empty `{}` never counts as validation data.
    #[must_use]
    pub fn from_payload(data: &Value) -> Option<Self> {
        let object = data.as_object()?;
        Self::new(coerce_object(object))
    }

    /// Message for a field, if that field failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate `(field, message)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of failing fields. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn coerce_object(object: &Map<String, Value>) -> BTreeMap<String, String> {
    object
        .iter()
        .filter_map(|(field, value)| coerce_value(value).map(|message| (field.clone(), message)))
        .collect()
}

fn coerce_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => Some(value.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(coerce_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
    }
}
