//! Month and week grid arithmetic.
//!
//! Months are zero-based here (0 = January) and roll over into following
//! years when they exceed 11. Weeks always start on Monday.

use chrono::{Datelike, Days, NaiveDate};

/// Splits a possibly overflowing zero-based month into `(year, month1)`.
fn normalize(month0: u32, year: i32) -> (i32, u32) {
    let extra_years = i32::try_from(month0 / 12).unwrap_or(0);
    (year.saturating_add(extra_years), month0 % 12 + 1)
}

/// Gregorian leap year rule.
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the given month.
pub fn days_in_month(month0: u32, year: i32) -> u32 {
    let (year, month) = normalize(month0, year);
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Column of the 1st of the month in a Monday-first week (Monday = 0, Sunday = 6).
pub fn start_weekday_of_month(month0: u32, year: i32) -> u32 {
    let (year, month) = normalize(month0, year);
    NaiveDate::from_ymd_opt(year, month, 1).map_or(0, |d| d.weekday().num_days_from_monday())
}

/// Moves `delta` months from the given month, rolling the year over as needed.
pub fn shift_month(year: i32, month0: u32, delta: i32) -> (i32, u32) {
    let total = i64::from(year) * 12 + i64::from(month0) + i64::from(delta);
    let year = i32::try_from(total.div_euclid(12)).unwrap_or(year);
    let month0 = u32::try_from(total.rem_euclid(12)).unwrap_or(0);
    (year, month0)
}

/// Week rows for a month view. Cells outside the month are `None`.
pub fn month_grid(month0: u32, year: i32) -> Vec<[Option<u32>; 7]> {
    let offset = start_weekday_of_month(month0, year) as usize;
    let days = days_in_month(month0, year);

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut column = offset;
    for day in 1..=days {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }
    weeks
}

/// The Monday-to-Sunday dates of the week containing `date`.
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .map_or_else(Vec::new, |monday| monday.iter_days().take(7).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_respects_leap_years() {
        assert_eq!(days_in_month(1, 2024), 29);
        assert_eq!(days_in_month(1, 2023), 28);
        assert_eq!(days_in_month(1, 1900), 28);
        assert_eq!(days_in_month(1, 2000), 29);
    }

    #[test]
    fn month_lengths() {
        let lengths: Vec<u32> = (0..12).map(|m| days_in_month(m, 2023)).collect();
        assert_eq!(lengths, [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn month_index_rolls_into_next_year() {
        // Month 13 of 2023 is February 2024.
        assert_eq!(days_in_month(13, 2023), 29);
    }

    #[test]
    fn start_weekday_is_monday_first() {
        // September 2024 starts on a Sunday, July 2024 on a Monday.
        assert_eq!(start_weekday_of_month(8, 2024), 6);
        assert_eq!(start_weekday_of_month(6, 2024), 0);
        // March 2024 starts on a Friday.
        assert_eq!(start_weekday_of_month(2, 2024), 4);
    }

    #[test]
    fn shift_month_rolls_year() {
        assert_eq!(shift_month(2024, 0, -1), (2023, 11));
        assert_eq!(shift_month(2024, 11, 1), (2025, 0));
        assert_eq!(shift_month(2024, 5, -18), (2022, 11));
        assert_eq!(shift_month(2024, 5, 0), (2024, 5));
    }

    #[test]
    fn month_grid_places_days_under_weekdays() {
        // September 2024: starts Sunday, 30 days.
        let grid = month_grid(8, 2024);
        assert_eq!(grid.len(), 6);
        assert_eq!(grid[0], [None, None, None, None, None, None, Some(1)]);
        assert_eq!(grid[1][0], Some(2));
        assert_eq!(grid[5], [Some(30), None, None, None, None, None, None]);
    }

    #[test]
    fn month_grid_without_trailing_partial_week() {
        // February 2021: starts Monday, 28 days, exactly four rows.
        let grid = month_grid(1, 2021);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[3][6], Some(28));
    }

    #[test]
    fn week_dates_start_on_monday() {
        let wednesday = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let week = week_dates(wednesday);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(week[6], NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());

        let sunday = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        assert_eq!(week_dates(sunday)[0], week[0]);
    }
}
