//! List command for searched and filtered event views.

use std::io::Write;

use agenda_core::{Criterion, Event};
use agenda_db::{BlobStore, Scheduler};
use anyhow::Result;
use chrono::NaiveDate;

use crate::commands::util::event_line;

/// Runs the list command.
pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    scheduler: &Scheduler<B>,
    search: &str,
    criterion: Criterion,
    reference: NaiveDate,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let events = scheduler.filtered_view_at(search, criterion, reference, today);
    write_events(writer, &events, json, "No matching events.")
}

/// Writes events as text lines or a JSON array.
pub fn write_events<W: Write>(
    writer: &mut W,
    events: &[&Event],
    json: bool,
    empty_message: &str,
) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(events)?)?;
        return Ok(());
    }
    if events.is_empty() {
        writeln!(writer, "{empty_message}")?;
        return Ok(());
    }
    for event in events {
        writeln!(writer, "{}", event_line(event))?;
    }
    Ok(())
}
