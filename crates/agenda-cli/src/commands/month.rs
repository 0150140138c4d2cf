//! Month command: a Monday-first calendar grid.

use std::collections::HashSet;
use std::io::Write;

use agenda_core::Event;
use agenda_core::grid::{month_grid, shift_month};
use anyhow::Result;
use chrono::{Datelike, Month};

const DAY_NAMES: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Runs the month command. Days with at least one event are marked with `*`.
pub fn run<W: Write>(writer: &mut W, events: &[Event], year: i32, month0: u32) -> Result<()> {
    let (year, month0) = shift_month(year, month0, 0);
    let busy: HashSet<u32> = events
        .iter()
        .filter_map(Event::day)
        .filter(|d| d.year() == year && d.month0() == month0)
        .map(|d| d.day())
        .collect();

    let name = u8::try_from(month0 + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("?", |m| m.name());
    writeln!(writer, "{name} {year}")?;
    writeln!(writer, "{}", DAY_NAMES.join("  "))?;

    for week in month_grid(month0, year) {
        let line: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) if busy.contains(day) => format!("{day:>2}* "),
                Some(day) => format!("{day:>2}  "),
                None => "    ".to_string(),
            })
            .collect();
        writeln!(writer, "{}", line.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use agenda_core::{EventDraft, EventId};
    use insta::assert_snapshot;

    use super::*;

    fn render(events: &[Event], year: i32, month0: u32) -> String {
        let mut output = Vec::new();
        run(&mut output, events, year, month0).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn month_grid_starts_on_monday_and_marks_busy_days() {
        let events = vec![
            EventDraft::new("a").on("2024-03-10").into_event(EventId::new(1), false),
            EventDraft::new("b").on("2024-03-15").into_event(EventId::new(2), false),
            EventDraft::new("c").on("2024-04-15").into_event(EventId::new(3), false),
        ];
        assert_snapshot!(render(&events, 2024, 2), @r"
        March 2024
        Mo  Tu  We  Th  Fr  Sa  Su
                         1   2   3
         4   5   6   7   8   9  10*
        11  12  13  14  15* 16  17
        18  19  20  21  22  23  24
        25  26  27  28  29  30  31
        ");
    }

    #[test]
    fn month_starting_on_sunday_puts_first_day_last() {
        let output = render(&[], 2024, 8);
        let first_row = output.lines().nth(2).unwrap();
        assert_eq!(first_row, format!("{}1", " ".repeat(25)));
    }

    #[test]
    fn month_past_december_rolls_into_next_year() {
        let output = render(&[], 2024, 12);
        assert_eq!(output.lines().next(), Some("January 2025"));
    }
}
