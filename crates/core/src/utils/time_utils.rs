use chrono::{Datelike, Duration, Months, NaiveDate};

/// Adds calendar months to a date, clamping to the end of shorter months.
///
/// Returns `None` when the result falls outside the supported calendar.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Half-open `[start, end)` range covering one calendar month.
///
/// Returns `None` for a month outside `1..=12` or an unrepresentable year.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = start.checked_add_months(Months::new(1))?;
    Some((start, end))
}

/// Half-open `[start, end)` range for the trailing week ending on `today`.
pub fn week_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(6), today + Duration::days(1))
}

/// Half-open `[start, end)` range covering the calendar year of `today`.
pub fn year_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let year = today.year();
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap_or(today);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(d(2024, 1, 31), 1), Some(d(2024, 2, 29)));
        assert_eq!(add_months(d(2024, 3, 15), 12), Some(d(2025, 3, 15)));
    }

    #[test]
    fn test_add_months_past_the_calendar_is_none() {
        assert_eq!(add_months(d(2024, 1, 1), u32::MAX), None);
    }

    #[test]
    fn test_month_range_december_rolls_year() {
        assert_eq!(month_range(2024, 12), Some((d(2024, 12, 1), d(2025, 1, 1))));
        assert_eq!(month_range(2024, 13), None);
    }

    #[test]
    fn test_week_and_year_ranges() {
        assert_eq!(week_range(d(2024, 5, 10)), (d(2024, 5, 4), d(2024, 5, 11)));
        assert_eq!(year_range(d(2024, 5, 10)), (d(2024, 1, 1), d(2025, 1, 1)));
    }
}
