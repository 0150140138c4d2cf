//! Day command: one date's events and the conflicts among them.

use std::io::Write;

use agenda_core::query::events_on_date;
use agenda_core::{Event, conflicts_on, format_date};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::commands::conflicts::write_conflicts;
use crate::commands::util::event_line;

/// Runs the day command.
pub fn run<W: Write>(writer: &mut W, events: &[Event], date: NaiveDate) -> Result<()> {
    let day_events = events_on_date(events, date.year(), date.month0(), date.day());
    writeln!(writer, "{}", date.format("%A, %B %-d, %Y"))?;

    if day_events.is_empty() {
        writeln!(writer, "No events.")?;
        return Ok(());
    }
    for event in &day_events {
        writeln!(writer, "{}", event_line(event))?;
    }

    let conflicts = conflicts_on(day_events, &format_date(date));
    if !conflicts.is_empty() {
        writeln!(writer)?;
        write_conflicts(writer, &conflicts, false)?;
    }
    Ok(())
}
