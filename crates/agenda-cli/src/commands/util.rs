//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use agenda_core::{Event, parse_date};
use anyhow::Context;
use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative day parsing.
static RELATIVE_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\s+days?\s+ago|in\s+(\d+)\s+days?)$").unwrap()
});

/// Conservative bound for relative day offsets (~1000 years).
const MAX_RELATIVE_DAYS: u64 = 1000 * 366;

/// Parse a date argument relative to `today`.
///
/// Supports:
/// - ISO 8601 dates: "2026-01-15"
/// - Keywords: "today", "tomorrow", "yesterday"
/// - Relative: "3 days ago", "in 2 days"
pub fn parse_day(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim().to_lowercase();
    if let Some(date) = parse_date(&s) {
        return Ok(date);
    }

    let shifted = match s.as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => {
            let Some(caps) = RELATIVE_DAY_RE.captures(&s) else {
                anyhow::bail!(
                    "Invalid date: {s}. Use YYYY-MM-DD, today, tomorrow, yesterday, '3 days ago' or 'in 3 days'"
                );
            };
            let (digits, forward) = match (caps.get(1), caps.get(2)) {
                (Some(ago), _) => (ago.as_str(), false),
                (None, Some(ahead)) => (ahead.as_str(), true),
                (None, None) => anyhow::bail!("Invalid date: {s}"),
            };
            let n: u64 = digits
                .parse()
                .context("failed to parse number in relative date")?;
            if n > MAX_RELATIVE_DAYS {
                anyhow::bail!("Relative date too far away: {n} days");
            }
            if forward {
                today.checked_add_days(Days::new(n))
            } else {
                today.checked_sub_days(Days::new(n))
            }
        }
    };
    shifted.with_context(|| format!("date out of range: {s}"))
}

/// Parse a `YYYY-MM` month into `(year, zero-based month)`.
pub fn parse_month(s: &str) -> anyhow::Result<(i32, u32)> {
    let first = parse_date(&format!("{}-01", s.trim()))
        .with_context(|| format!("Invalid month: {s}. Use YYYY-MM (e.g., 2026-01)"))?;
    Ok((first.year(), first.month0()))
}

/// One-line summary of an event for terminal output.
pub fn event_line(event: &Event) -> String {
    let mark = if event.completed { "x" } else { " " };
    let date = event.date.as_deref().unwrap_or("----------");
    let times = match (&event.start_time, &event.end_time) {
        (Some(start), Some(end)) => format!("{start}-{end}"),
        (Some(start), None) => format!("{start}-     "),
        _ => "all day    ".to_string(),
    };
    let mut line = format!("[{mark}] {:<13} {date} {times} {}", event.id, event.title);
    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        line.push_str(" @ ");
        line.push_str(location);
    }
    line
}
