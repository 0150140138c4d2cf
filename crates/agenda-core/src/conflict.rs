//! Scheduling conflict detection.
//!
//! # Algorithm
//!
//! 1. Group events by their `date` string (events without one are skipped).
//! 2. Within each date, compare every unordered pair once, in input order.
//! 3. A pair conflicts when its half-open `[start, end)` intervals intersect:
//!    `start1 < end2 && start2 < end1`. Back-to-back events do not conflict.
//!
//! Pairs where either event lacks a parseable start or end are not compared.
//! The pairwise scan is quadratic per day, which is fine for tens of events;
//! a sorted sweep would be the upgrade if days ever hold thousands.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::types::{EventId, ValidationError};

const KEY_PREFIX: &str = "conflict-";

/// Stable identity of a conflict: its date plus both event ids, ascending.
///
/// Rendered as `conflict-<date>-<id>-<id>`, which is the form persisted in the
/// acknowledged set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConflictKey {
    date: String,
    first: EventId,
    second: EventId,
}

impl ConflictKey {
    /// Builds a key; the ids may be given in either order.
    pub fn new(date: impl Into<String>, a: EventId, b: EventId) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            date: date.into(),
            first,
            second,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Both ids, smaller first.
    pub const fn ids(&self) -> (EventId, EventId) {
        (self.first, self.second)
    }

    /// Returns true if either side of the conflict is `id`.
    pub fn involves(&self, id: EventId) -> bool {
        self.first == id || self.second == id
    }
}

impl fmt::Display for ConflictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KEY_PREFIX}{}-{}-{}", self.date, self.first, self.second)
    }
}

impl FromStr for ConflictKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidConflictKey {
            value: s.to_string(),
        };
        let rest = s.strip_prefix(KEY_PREFIX).ok_or_else(invalid)?;
        // Dates contain dashes, so split the ids off from the right.
        let mut parts = rest.rsplitn(3, '-');
        let second = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let first = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let date = parts.next().filter(|d| !d.is_empty()).ok_or_else(invalid)?;
        Ok(Self::new(date, first, second))
    }
}

impl TryFrom<String> for ConflictKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConflictKey> for String {
    fn from(key: ConflictKey) -> Self {
        key.to_string()
    }
}

/// Two events on the same date whose times overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict<'a> {
    pub date: &'a str,
    pub events: [&'a Event; 2],
}

impl Conflict<'_> {
    /// The stable key for this pair.
    pub fn key(&self) -> ConflictKey {
        ConflictKey::new(self.date, self.events[0].id, self.events[1].id)
    }
}

/// Half-open interval intersection.
pub fn overlaps(a: (NaiveTime, NaiveTime), b: (NaiveTime, NaiveTime)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Finds every overlapping pair, ordered by date then by pair position.
pub fn detect_conflicts<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<Conflict<'a>> {
    let mut by_date: BTreeMap<&str, Vec<&Event>> = BTreeMap::new();
    for event in events {
        let Some(date) = event.date.as_deref().filter(|d| !d.trim().is_empty()) else {
            continue;
        };
        by_date.entry(date).or_default().push(event);
    }

    let mut conflicts = Vec::new();
    for (date, day_events) in by_date {
        for (index, first) in day_events.iter().enumerate() {
            let Some(first_interval) = first.interval() else {
                continue;
            };
            for second in &day_events[index + 1..] {
                let Some(second_interval) = second.interval() else {
                    continue;
                };
                if overlaps(first_interval, second_interval) {
                    conflicts.push(Conflict {
                        date,
                        events: [*first, *second],
                    });
                }
            }
        }
    }
    conflicts
}

/// Conflicts restricted to a single date.
pub fn conflicts_on<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    date: &str,
) -> Vec<Conflict<'a>> {
    detect_conflicts(
        events
            .into_iter()
            .filter(|e| e.date.as_deref() == Some(date)),
    )
}
