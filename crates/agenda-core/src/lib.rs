//! Core domain logic for the agenda scheduler.
//!
//! This crate contains the fundamental types and pure logic for:
//! - Events: the stored record, drafts, and wall-clock parsing
//! - Queries: date, month, text, and criterion views over events
//! - Conflicts: same-day overlap detection with stable keys
//! - Grids: Monday-first month and week arithmetic

pub mod conflict;
pub mod event;
pub mod grid;
pub mod query;
pub mod types;

pub use conflict::{Conflict, ConflictKey, conflicts_on, detect_conflicts};
pub use event::{DEFAULT_COLOR, Event, EventDraft, format_date, parse_date, parse_time};
pub use types::{Criterion, EventId, ValidationError};
