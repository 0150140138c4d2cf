//! Upcoming command for the next open events.

use std::io::Write;

use agenda_db::{BlobStore, Scheduler};
use anyhow::Result;
use chrono::NaiveDate;

use crate::commands::list::write_events;

/// Runs the upcoming command.
pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    scheduler: &Scheduler<B>,
    limit: usize,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let events = scheduler.upcoming_at(Some(limit), today);
    write_events(writer, &events, json, "No upcoming events.")
}
