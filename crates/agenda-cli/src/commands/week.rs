//! Week command: the Monday-to-Sunday agenda around a date.

use std::io::Write;

use agenda_core::Event;
use agenda_core::grid::week_dates;
use agenda_core::query::events_on_date;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::commands::util::event_line;

/// Runs the week command.
pub fn run<W: Write>(writer: &mut W, events: &[Event], date: NaiveDate) -> Result<()> {
    let dates = week_dates(date);
    let Some(monday) = dates.first() else {
        anyhow::bail!("week of {date} is out of range");
    };
    writeln!(writer, "Week of {}", monday.format("%A, %B %-d, %Y"))?;

    for day in &dates {
        writeln!(writer, "{}", day.format("%a %Y-%m-%d"))?;
        for event in events_on_date(events, day.year(), day.month0(), day.day()) {
            writeln!(writer, "  {}", event_line(event))?;
        }
    }
    Ok(())
}
