//! Status command for showing what the store holds.

use std::io::Write;
use std::path::Path;

use agenda_db::{EVENTS_KEY, Scheduler, SqliteBlobStore};
use anyhow::Result;

pub fn run<W: Write>(
    writer: &mut W,
    scheduler: &Scheduler<SqliteBlobStore>,
    database_path: &Path,
) -> Result<()> {
    let events = scheduler.events();
    let completed = events.iter().filter(|e| e.completed).count();
    let last_saved = scheduler.blob().updated_at(EVENTS_KEY)?;

    writeln!(writer, "Agenda status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Events: {} ({completed} completed)", events.len())?;
    writeln!(
        writer,
        "Acknowledged conflicts: {}",
        scheduler.acknowledged().count()
    )?;
    writeln!(
        writer,
        "Last saved: {}",
        last_saved.as_deref().unwrap_or("never")
    )?;
    Ok(())
}
