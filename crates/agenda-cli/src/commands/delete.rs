//! Delete and complete commands.

use std::io::Write;

use agenda_core::EventId;
use agenda_db::{BlobStore, Scheduler};
use anyhow::{Context, Result};

/// Runs the delete command. Unknown ids are reported, not treated as errors.
pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    scheduler: &mut Scheduler<B>,
    id: EventId,
) -> Result<()> {
    let removed = scheduler
        .delete_event(id)
        .with_context(|| format!("failed to delete event {id}"))?;
    if removed {
        writeln!(writer, "Deleted event {id}")?;
    } else {
        writeln!(writer, "No event with ID {id}")?;
    }
    Ok(())
}

/// Runs the complete command.
pub fn complete<W: Write, B: BlobStore>(
    writer: &mut W,
    scheduler: &mut Scheduler<B>,
    id: EventId,
) -> Result<()> {
    let found = scheduler
        .complete_event(id)
        .with_context(|| format!("failed to complete event {id}"))?;
    if found {
        writeln!(writer, "Completed event {id}")?;
    } else {
        writeln!(writer, "No event with ID {id}")?;
    }
    Ok(())
}
