//! Calendar events and the drafts they are created from.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{EventId, ValidationError};

/// Color applied when an event is saved without one.
pub const DEFAULT_COLOR: &str = "#1a73e8";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A stored calendar event.
///
/// Dates and times are kept as the wall-clock strings they were entered with
/// (`YYYY-MM-DD`, `HH:MM`). Typed accessors parse them on demand so that a
/// malformed value only excludes the event from the computation that needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, assigned at creation.
    pub id: EventId,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Start of the event, `HH:MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    /// End of the event, `HH:MM`. Exclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Whether the event has been marked done.
    #[serde(default)]
    pub completed: bool,
    /// Hex color or semantic color token.
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Timezone label. Stored only; never used for conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Fields carried without interpretation (`repeat`, `guests`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    /// Parsed calendar date, if present and well-formed.
    pub fn day(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Parsed start time, if present and well-formed.
    pub fn start(&self) -> Option<NaiveTime> {
        self.start_time.as_deref().and_then(parse_time)
    }

    /// Parsed end time, if present and well-formed.
    pub fn end(&self) -> Option<NaiveTime> {
        self.end_time.as_deref().and_then(parse_time)
    }

    /// The half-open `[start, end)` interval, when both ends parse.
    pub fn interval(&self) -> Option<(NaiveTime, NaiveTime)> {
        Some((self.start()?, self.end()?))
    }

    /// Returns true if `id` identifies this event.
    pub fn is(&self, id: EventId) -> bool {
        self.id == id
    }
}

/// An event as submitted for saving.
///
/// Drafts for new events leave `id` empty; the store assigns it. Drafts for
/// edits carry the id of the event they replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// `None` keeps the current value on edit and means `false` on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EventDraft {
    /// Creates a draft with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the calendar date.
    #[must_use]
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Sets the start and end times.
    #[must_use]
    pub fn between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    /// Checks the draft before it is stored.
    ///
    /// The title must contain non-whitespace text. Date and time fields are
    /// optional, but when present they must parse.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if let Some(date) = &self.date {
            if parse_date(date).is_none() {
                return Err(ValidationError::InvalidDate {
                    value: date.clone(),
                });
            }
        }
        for (field, value) in [("startTime", &self.start_time), ("endTime", &self.end_time)] {
            if let Some(value) = value {
                if parse_time(value).is_none() {
                    return Err(ValidationError::InvalidTime {
                        field,
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Parsed calendar date, if present and well-formed.
    pub fn day(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date)
    }

    /// Builds the stored event, filling defaults for `completed` and `color`.
    pub fn into_event(self, id: EventId, completed_default: bool) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            completed: self.completed.unwrap_or(completed_default),
            color: self
                .color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(default_color),
            description: self.description,
            location: self.location,
            timezone: self.timezone,
            extra: self.extra,
        }
    }
}

impl From<Event> for EventDraft {
    fn from(event: Event) -> Self {
        Self {
            id: Some(event.id),
            title: event.title,
            date: event.date,
            start_time: event.start_time,
            end_time: event.end_time,
            completed: Some(event.completed),
            color: Some(event.color),
            description: event.description,
            location: event.location,
            timezone: event.timezone,
            extra: event.extra,
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parses an `HH:MM` (or `HH:MM:SS`) wall-clock time.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Formats a date the way it is stored on events.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
