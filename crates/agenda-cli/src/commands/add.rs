//! Add command for creating events.

use std::io::Write;

use agenda_core::{EventDraft, format_date};
use agenda_db::{BlobStore, SaveWarning, Scheduler};
use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::cli::EventFields;
use crate::commands::util::{event_line, parse_day};

/// Runs the add command.
pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    scheduler: &mut Scheduler<B>,
    title: &str,
    date: &str,
    fields: EventFields,
    default_color: &str,
    today: NaiveDate,
) -> Result<()> {
    let date = parse_day(date, today)?;
    let draft = EventDraft {
        title: title.to_string(),
        date: Some(format_date(date)),
        start_time: fields.start,
        end_time: fields.end,
        description: fields.description,
        location: fields.location,
        color: Some(fields.color.unwrap_or_else(|| default_color.to_string())),
        timezone: iana_time_zone::get_timezone().ok(),
        ..EventDraft::default()
    };

    let saved = scheduler
        .save_event_at(draft, false, today)
        .context("failed to add event")?;
    report_warnings(&saved.warnings);

    writeln!(writer, "Added event {}", saved.event.id)?;
    writeln!(writer, "{}", event_line(&saved.event))?;
    Ok(())
}

/// Prints save warnings to stderr.
pub fn report_warnings(warnings: &[SaveWarning]) {
    for warning in warnings {
        match warning {
            SaveWarning::PastDate { date } => {
                eprintln!("Warning: {date} is in the past; the event was saved anyway.");
            }
        }
    }
}
