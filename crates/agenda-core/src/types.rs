//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty or whitespace-only.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A date string was not in `YYYY-MM-DD` form.
    #[error("invalid date: {value} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    /// A time string was not in `HH:MM` form.
    #[error("invalid {field}: {value} (expected HH:MM)")]
    InvalidTime { field: &'static str, value: String },

    /// Unknown filter criterion name.
    #[error("invalid criterion: {value}")]
    InvalidCriterion { value: String },

    /// A conflict key string could not be parsed.
    #[error("invalid conflict key: {value}")]
    InvalidConflictKey { value: String },
}

/// A unique event identifier.
///
/// Identifiers are millisecond creation timestamps. They are assigned once when
/// an event is first stored and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Named filter predicates for event views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Criterion {
    /// No filtering.
    #[default]
    All,
    /// Events in the reference date's month.
    ThisMonth,
    /// Events in the month before the reference date's month.
    PreviousMonth,
    /// Events dated today or later that are not completed.
    Upcoming,
    /// Completed events.
    Completed,
}

impl Criterion {
    /// String representation used on the command line and in JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ThisMonth => "thisMonth",
            Self::PreviousMonth => "previousMonth",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "thisMonth" | "this-month" => Ok(Self::ThisMonth),
            "previousMonth" | "previous-month" => Ok(Self::PreviousMonth),
            "upcoming" => Ok(Self::Upcoming),
            "completed" => Ok(Self::Completed),
            _ => Err(ValidationError::InvalidCriterion {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Criterion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Criterion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_id_serializes_as_bare_integer() {
        let id = EventId::new(1_710_000_000_000);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "1710000000000");
        let parsed: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn event_id_parses_from_cli_text() {
        assert_eq!(" 42 ".parse::<EventId>().unwrap(), EventId::new(42));
        assert!("abc".parse::<EventId>().is_err());
    }

    #[test]
    fn criterion_roundtrip_all_variants() {
        let variants = [
            Criterion::All,
            Criterion::ThisMonth,
            Criterion::PreviousMonth,
            Criterion::Upcoming,
            Criterion::Completed,
        ];

        for variant in &variants {
            let s = variant.to_string();
            let parsed: Criterion = s.parse().expect("should parse");
            assert_eq!(parsed, *variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn criterion_accepts_kebab_aliases() {
        assert_eq!(
            "this-month".parse::<Criterion>().unwrap(),
            Criterion::ThisMonth
        );
        assert_eq!(
            "previous-month".parse::<Criterion>().unwrap(),
            Criterion::PreviousMonth
        );
    }

    #[test]
    fn unknown_criterion_errors() {
        let err = "someday".parse::<Criterion>().unwrap_err();
        assert_eq!(err.to_string(), "invalid criterion: someday");
    }

    #[test]
    fn criterion_serde_uses_camel_case() {
        let json = serde_json::to_string(&Criterion::PreviousMonth).unwrap();
        assert_eq!(json, "\"previousMonth\"");
        let parsed: Criterion = serde_json::from_str("\"thisMonth\"").unwrap();
        assert_eq!(parsed, Criterion::ThisMonth);
    }
}
