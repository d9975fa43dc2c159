//! Shared types used across the Nutrilink client crates.

use crate::error::NutrilinkError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display locale for user-facing strings (toast titles, field labels).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    /// English
    #[default]
    #[serde(rename = "en")]
    En,
    /// Brazilian Portuguese
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl Locale {
    /// BCP 47 tag for the locale.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::PtBr => "pt-BR",
        }
    }
}

impl FromStr for Locale {
    type Err = NutrilinkError;

    /// Parses a locale tag. Matching is case-insensitive and accepts `_` as
    /// the region separator; a bare `pt` resolves to `pt-BR`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "pt" | "pt-br" => Ok(Self::PtBr),
            other => Err(NutrilinkError::Validation(format!(
                "unsupported locale '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Newtype for backend notification identifiers.
///
/// IDs are interpolated into request paths, so they must be 1-128 characters
/// of ASCII alphanumerics, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationId(String);

impl NotificationId {
    /// Create a new `NotificationId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID is empty, too long, or contains characters
    /// that are not safe in a URL path segment.
    pub fn new(id: impl Into<String>) -> Result<Self, NutrilinkError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), NutrilinkError> {
        if id.is_empty() || id.len() > 128 {
            return Err(NutrilinkError::Validation(format!(
                "invalid notification ID: must be 1-128 characters, got {} characters",
                id.len()
            )));
        }

        if id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Ok(())
        } else {
            Err(NutrilinkError::Validation(format!(
                "invalid notification ID: must be alphanumeric with '-' or '_', got '{id}'"
            )))
        }
    }
}

impl TryFrom<String> for NotificationId {
    type Error = NutrilinkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NotificationId> for String {
    fn from(id: NotificationId) -> Self {
        id.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, NutrilinkError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| NutrilinkError::Validation(format!("invalid timestamp: {e}")))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        assert_eq!("en".parse::<Locale>().expect("parse en"), Locale::En);
        assert_eq!("pt-BR".parse::<Locale>().expect("parse pt-BR"), Locale::PtBr);
        assert_eq!("pt_br".parse::<Locale>().expect("parse pt_br"), Locale::PtBr);
        assert_eq!("pt".parse::<Locale>().expect("parse pt"), Locale::PtBr);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_serialization() {
        let json = serde_json::to_string(&Locale::PtBr).expect("serialize locale");
        assert_eq!(json, "\"pt-BR\"");

        let parsed: Locale = serde_json::from_str("\"en\"").expect("deserialize locale");
        assert_eq!(parsed, Locale::En);
        assert_eq!(Locale::default(), Locale::En);
    }

    #[test]
    fn test_notification_id_valid() {
        let valid_ids = vec!["42", "ntf_01HZX3", "550e8400-e29b-41d4-a716-446655440000"];

        for id in valid_ids {
            assert!(NotificationId::new(id).is_ok(), "Failed for: {id}");
        }
    }

    #[test]
    fn test_notification_id_invalid() {
        let too_long = "a".repeat(129);
        let invalid_ids = vec!["", "../admin", "a b", "id?x=1", too_long.as_str()];

        for id in invalid_ids {
            assert!(NotificationId::new(id).is_err(), "Should fail for: {id}");
        }
    }

    #[test]
    fn test_notification_id_deserialize_validates() {
        let ok: NotificationId = serde_json::from_str("\"abc-1\"").expect("valid id");
        assert_eq!(ok.as_str(), "abc-1");

        let err = serde_json::from_str::<NotificationId>("\"a/b\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let ts = Timestamp::from_rfc3339("2024-03-01T12:30:00Z").expect("parse timestamp");
        assert_eq!(ts.to_rfc3339(), "2024-03-01T12:30:00+00:00");
        assert_eq!(ts.to_string(), ts.to_rfc3339());
        assert!(Timestamp::from_rfc3339("yesterday").is_err());
    }

    #[test]
    fn test_timestamp_ordering() {
        let earlier = Timestamp::from_rfc3339("2024-03-01T12:30:00Z").expect("parse");
        let later = Timestamp::from_rfc3339("2024-03-02T08:00:00Z").expect("parse");
        assert!(later > earlier);
    }
}
