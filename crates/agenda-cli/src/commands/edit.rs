//! Edit command for replacing fields on an existing event.

use std::io::Write;

use agenda_core::{EventDraft, EventId, format_date};
use agenda_db::{BlobStore, Scheduler};
use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::cli::EventFields;
use crate::commands::add::report_warnings;
use crate::commands::util::{event_line, parse_day};

/// Runs the edit command. Fields left unset keep their current values.
pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    scheduler: &mut Scheduler<B>,
    id: EventId,
    title: Option<String>,
    date: Option<&str>,
    fields: EventFields,
    today: NaiveDate,
) -> Result<()> {
    let existing = scheduler
        .event(id)
        .cloned()
        .with_context(|| format!("event {id} not found"))?;

    let mut draft = EventDraft::from(existing);
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(date) = date {
        draft.date = Some(format_date(parse_day(date, today)?));
    }
    let EventFields {
        start,
        end,
        description,
        location,
        color,
    } = fields;
    draft.start_time = start.or(draft.start_time);
    draft.end_time = end.or(draft.end_time);
    draft.description = description.or(draft.description);
    draft.location = location.or(draft.location);
    draft.color = color.or(draft.color);

    let saved = scheduler
        .save_event_at(draft, true, today)
        .with_context(|| format!("failed to update event {id}"))?;
    report_warnings(&saved.warnings);

    writeln!(writer, "Updated event {id}")?;
    writeln!(writer, "{}", event_line(&saved.event))?;
    Ok(())
}
