//! Domain records persisted in the key/value store.
//!
//! # Responsibility
//! - Define the serialized shape of every stored collection.
//! - Own record-level invariants through `validate()`.
//!
//! # Invariants
//! - JSON field names are camelCase and stable across releases; exported
//!   files from older builds must keep loading.
//! - Every record is identified by a string `RecordId` that is never reused.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod goal;
pub mod habit;
pub mod reflection;
pub mod settings;
pub mod skill;
pub mod task;
pub mod weekly;

/// Stable record identifier.
///
/// Kept as a string so ids produced by other tools (for example millisecond
/// timestamps) survive an import unchanged.
pub type RecordId = String;

/// Generates a fresh record id.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Record-level invariant violation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace only.
    BlankField(&'static str),
    /// Goal target must be strictly positive.
    NonPositiveTarget(f64),
    /// A numeric value fell outside its allowed range.
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Habit frequency must be at least one.
    ZeroFrequency,
    /// A value that must be unique appears more than once.
    Duplicate { field: &'static str, value: String },
    /// Reminder time is not a `HH:MM` clock value.
    InvalidTime(String),
    /// Value is not one of the accepted names for `field`.
    UnknownValue { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "`{field}` must not be blank"),
            Self::NonPositiveTarget(value) => {
                write!(f, "goal target must be greater than 0, got {value}")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "`{field}` must be within {min}..={max}, got {value}"),
            Self::ZeroFrequency => write!(f, "habit frequency must be at least 1"),
            Self::Duplicate { field, value } => {
                write!(f, "duplicate value `{value}` in `{field}`")
            }
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
            Self::UnknownValue { field, value } => {
                write!(f, "unknown value `{value}` in `{field}`")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

/// Reads a `YYYY-MM-DD` date, or the date part of an RFC 3339 timestamp as
/// written by `JSON.stringify(new Date(..))`.
pub(crate) fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_calendar_date(&text).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid date `{text}`; expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })
}

fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|at| at.date_naive()))
}

/// Trims tags, drops blanks and keeps the first occurrence of each tag.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() || normalized.iter().any(|existing| existing == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::{
        new_record_id, normalize_tags, parse_calendar_date, require_text, ValidationError,
    };
    use chrono::NaiveDate;

    #[test]
    fn record_ids_are_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }

    #[test]
    fn require_text_rejects_whitespace() {
        assert_eq!(
            require_text("title", "  \t"),
            Err(ValidationError::BlankField("title"))
        );
        assert!(require_text("title", "Run").is_ok());
    }

    #[test]
    fn normalize_tags_trims_and_dedupes_in_order() {
        let tags = normalize_tags(["work ", "", "home", "work", " home"]);
        assert_eq!(tags, vec!["work".to_string(), "home".to_string()]);
    }

    #[test]
    fn calendar_dates_accept_plain_and_timestamp_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 5);
        assert_eq!(parse_calendar_date("2024-04-05"), expected);
        assert_eq!(parse_calendar_date("2024-04-05T00:00:00.000Z"), expected);
        assert_eq!(parse_calendar_date("2024-04-05T23:30:00+02:00"), expected);
        assert_eq!(parse_calendar_date("next friday"), None);
    }
}
