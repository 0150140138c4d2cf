//! Read-only views over an event sequence.
//!
//! Every function here is pure: it borrows the events it is given and returns
//! references to the ones that pass, in input order unless stated otherwise.
//! Events with a missing or malformed field are left out of whichever
//! computation needs that field; nothing here fails.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::event::Event;
use crate::grid::shift_month;
use crate::types::Criterion;

/// Default number of events returned by [`upcoming`].
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Events whose `date` equals the given day. `month0` is zero-based.
pub fn events_on_date<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    year: i32,
    month0: u32,
    day: u32,
) -> Vec<&'a Event> {
    let (year, month0) = shift_month(year, month0, 0);
    let target = format!("{year:04}-{:02}-{day:02}", month0 + 1);
    events
        .into_iter()
        .filter(|e| e.date.as_deref() == Some(target.as_str()))
        .collect()
}

/// Applies a named criterion.
///
/// `reference` selects the month for [`Criterion::ThisMonth`] and
/// [`Criterion::PreviousMonth`]; `today` is the cutoff for
/// [`Criterion::Upcoming`].
pub fn filter_by_criterion<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    criterion: Criterion,
    reference: NaiveDate,
    today: NaiveDate,
) -> Vec<&'a Event> {
    let events = events.into_iter();
    match criterion {
        Criterion::All => events.collect(),
        Criterion::ThisMonth => {
            let month = (reference.year(), reference.month0());
            events.filter(|e| in_month(e, month)).collect()
        }
        Criterion::PreviousMonth => {
            let month = shift_month(reference.year(), reference.month0(), -1);
            events.filter(|e| in_month(e, month)).collect()
        }
        Criterion::Upcoming => events.filter(|e| is_upcoming(e, today)).collect(),
        Criterion::Completed => events.filter(|e| e.completed).collect(),
    }
}

fn in_month(event: &Event, (year, month0): (i32, u32)) -> bool {
    event
        .day()
        .is_some_and(|d| d.year() == year && d.month0() == month0)
}

fn is_upcoming(event: &Event, today: NaiveDate) -> bool {
    !event.completed && event.day().is_some_and(|d| d >= today)
}

/// Case-insensitive substring search over title, description and location.
///
/// Blank text matches everything.
pub fn search<'a>(events: impl IntoIterator<Item = &'a Event>, text: &str) -> Vec<&'a Event> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return events.into_iter().collect();
    }
    events
        .into_iter()
        .filter(|e| {
            let contains = |s: &str| s.to_lowercase().contains(&needle);
            contains(&e.title)
                || e.description.as_deref().is_some_and(contains)
                || e.location.as_deref().is_some_and(contains)
        })
        .collect()
}

/// Text search followed by a criterion filter.
///
/// The search always runs first, so a criterion can only narrow what the text
/// matched.
pub fn combine<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    text: &str,
    criterion: Criterion,
    reference: NaiveDate,
    today: NaiveDate,
) -> Vec<&'a Event> {
    filter_by_criterion(search(events, text), criterion, reference, today)
}

/// The next `limit` open events from `today` on, ordered by date then start time.
///
/// A missing or malformed start time sorts as midnight.
pub fn upcoming<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    limit: usize,
    today: NaiveDate,
) -> Vec<&'a Event> {
    let mut keyed: Vec<(NaiveDate, NaiveTime, &Event)> = events
        .into_iter()
        .filter(|e| !e.completed)
        .filter_map(|e| {
            let day = e.day().filter(|d| *d >= today)?;
            Some((day, e.start().unwrap_or(NaiveTime::MIN), e))
        })
        .collect();
    keyed.sort_by_key(|(day, start, _)| (*day, *start));
    keyed.into_iter().take(limit).map(|(_, _, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;
    use crate::types::EventId;

    fn event(id: i64, title: &str, date: &str) -> Event {
        EventDraft::new(title)
            .on(date)
            .between("09:00", "10:00")
            .into_event(EventId::new(id), false)
    }

    fn ids(events: &[&Event]) -> Vec<i64> {
        events.iter().map(|e| e.id.value()).collect()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn events_on_date_matches_exact_day_in_input_order() {
        let events = vec![
            event(1, "a", "2024-03-10"),
            event(2, "b", "2024-03-11"),
            event(3, "c", "2024-03-10"),
        ];
        assert_eq!(ids(&events_on_date(&events, 2024, 2, 10)), [1, 3]);
        assert!(events_on_date(&events, 2024, 3, 10).is_empty());
    }

    #[test]
    fn events_on_date_pads_single_digits() {
        let events = vec![event(1, "a", "2024-01-05")];
        assert_eq!(ids(&events_on_date(&events, 2024, 0, 5)), [1]);
    }

    #[test]
    fn this_month_and_previous_month() {
        let events = vec![
            event(1, "a", "2024-01-31"),
            event(2, "b", "2023-12-15"),
            event(3, "c", "2024-02-01"),
        ];
        let reference = day("2024-01-20");
        let today = day("2024-01-20");

        let this = filter_by_criterion(&events, Criterion::ThisMonth, reference, today);
        assert_eq!(ids(&this), [1]);

        let previous = filter_by_criterion(&events, Criterion::PreviousMonth, reference, today);
        assert_eq!(ids(&previous), [2]);
    }

    #[test]
    fn upcoming_criterion_ignores_time_of_day_and_completed() {
        let mut done = event(3, "c", "2024-03-12");
        done.completed = true;
        let mut early = event(1, "a", "2024-03-10");
        early.start_time = Some("00:01".into());
        let events = vec![early, event(2, "b", "2024-03-09"), done];

        let today = day("2024-03-10");
        let result = filter_by_criterion(&events, Criterion::Upcoming, today, today);
        assert_eq!(ids(&result), [1]);
    }

    #[test]
    fn completed_criterion_keeps_only_completed() {
        let mut done = event(2, "b", "2024-03-12");
        done.completed = true;
        let events = vec![event(1, "a", "2024-03-10"), done];
        let today = day("2024-03-10");
        let result = filter_by_criterion(&events, Criterion::Completed, today, today);
        assert_eq!(ids(&result), [2]);
    }

    #[test]
    fn malformed_dates_are_excluded_from_date_criteria() {
        let events = vec![event(1, "a", "not-a-date")];
        let today = day("2024-03-10");
        assert!(filter_by_criterion(&events, Criterion::ThisMonth, today, today).is_empty());
        assert!(filter_by_criterion(&events, Criterion::Upcoming, today, today).is_empty());
        assert_eq!(filter_by_criterion(&events, Criterion::All, today, today).len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_over_text_fields() {
        let mut described = event(2, "Lunch", "2024-03-10");
        described.description = Some("Quarterly PLANNING review".into());
        let mut located = event(3, "Call", "2024-03-10");
        located.location = Some("Planning room".into());
        let events = vec![event(1, "Team planning", "2024-03-10"), described, located, event(4, "Gym", "2024-03-10")];

        assert_eq!(ids(&search(&events, "planning")), [1, 2, 3]);
        assert_eq!(ids(&search(&events, "  ")), [1, 2, 3, 4]);
        assert!(search(&events, "dentist").is_empty());
    }

    #[test]
    fn combine_searches_before_filtering() {
        let mut done = event(2, "Review notes", "2024-03-10");
        done.completed = true;
        let events = vec![event(1, "Review", "2024-03-10"), done, event(3, "Other", "2024-03-10")];
        let today = day("2024-03-10");

        let all = combine(&events, "review", Criterion::All, today, today);
        let completed = combine(&events, "review", Criterion::Completed, today, today);
        assert_eq!(ids(&all), [1, 2]);
        assert_eq!(ids(&completed), [2]);
        assert!(completed.iter().all(|e| all.contains(e)));
    }

    #[test]
    fn upcoming_sorts_by_date_then_start_and_truncates() {
        let today = day("2024-03-10");
        let mut later_same_day = event(1, "a", "2024-03-11");
        later_same_day.start_time = Some("14:00".into());
        let mut untimed = event(2, "b", "2024-03-11");
        untimed.start_time = None;
        let events = vec![
            event(5, "e", "2024-03-12"),
            later_same_day,
            untimed,
            event(3, "c", "2024-03-10"),
            event(4, "d", "2024-03-09"),
        ];

        assert_eq!(ids(&upcoming(&events, 10, today)), [3, 2, 1, 5]);
        assert_eq!(ids(&upcoming(&events, 2, today)), [3, 2]);
        assert!(upcoming(&events, 0, today).is_empty());
    }

    #[test]
    fn upcoming_returns_first_two_of_three_consecutive_days() {
        let today = day("2024-03-10");
        let events = vec![
            event(3, "c", "2024-03-12"),
            event(1, "a", "2024-03-10"),
            event(2, "b", "2024-03-11"),
        ];
        assert_eq!(ids(&upcoming(&events, 2, today)), [1, 2]);
    }
}
