//! Conflicts command for overlapping events.

use std::io::Write;

use agenda_core::{Conflict, ConflictKey, Event};
use agenda_db::{BlobStore, Scheduler};
use anyhow::{Context, Result};
use serde_json::json;

/// Runs the conflicts command.
///
/// With `ack`, every conflict shown is acknowledged afterwards so the next run
/// stays quiet until the events involved change.
pub fn run<W: Write, B: BlobStore>(
    writer: &mut W,
    scheduler: &mut Scheduler<B>,
    ack: bool,
    json: bool,
) -> Result<()> {
    let keys: Vec<ConflictKey> = {
        let conflicts = scheduler.conflicts();
        write_conflicts(writer, &conflicts, json)?;
        conflicts.iter().map(Conflict::key).collect()
    };

    if ack {
        let mut acknowledged = 0;
        for key in keys {
            if scheduler
                .acknowledge_conflict(key)
                .context("failed to acknowledge conflict")?
            {
                acknowledged += 1;
            }
        }
        tracing::debug!(acknowledged, "acknowledged conflicts");
        if !json {
            writeln!(writer, "Acknowledged {acknowledged} conflict(s).")?;
        }
    }
    Ok(())
}

/// Writes conflicts as text or a JSON array of `{key, date, events}`.
pub fn write_conflicts<W: Write>(writer: &mut W, conflicts: &[Conflict<'_>], json: bool) -> Result<()> {
    if json {
        let values: Vec<_> = conflicts
            .iter()
            .map(|c| {
                json!({
                    "key": c.key().to_string(),
                    "date": c.date,
                    "events": c.events,
                })
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&values)?)?;
        return Ok(());
    }

    if conflicts.is_empty() {
        writeln!(writer, "No conflicts.")?;
        return Ok(());
    }
    for conflict in conflicts {
        let [first, second] = conflict.events;
        writeln!(
            writer,
            "{}: {} overlaps {}",
            conflict.date,
            describe(first),
            describe(second)
        )?;
    }
    Ok(())
}

fn describe(event: &Event) -> String {
    format!(
        "{} ({}-{})",
        event.title,
        event.start_time.as_deref().unwrap_or_default(),
        event.end_time.as_deref().unwrap_or_default()
    )
}
