//! Monday-anchored week arithmetic.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

/// Number of days in one schedule window.
pub const DAYS_PER_WEEK: u64 = 7;

/// Returns the most recent Monday on or before `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(offset)
}

/// Returns the seven dates Monday..Sunday starting at `monday`.
pub fn week_dates(monday: NaiveDate) -> Vec<NaiveDate> {
    (0..DAYS_PER_WEEK)
        .map(|offset| monday + Days::new(offset))
        .collect()
}

/// Half-open date range `[start, end_exclusive)` covering one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end_exclusive: NaiveDate,
}

impl WeekWindow {
    /// Builds the Monday-anchored window containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let start = monday_of(date);
        Self {
            start,
            end_exclusive: start + Days::new(DAYS_PER_WEEK),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end_exclusive
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        week_dates(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::{monday_of, week_dates, WeekWindow};
    use chrono::{NaiveDate, Weekday, Datelike};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monday_of_monday_is_itself() {
        assert_eq!(monday_of(date(2024, 6, 3)), date(2024, 6, 3));
    }

    #[test]
    fn monday_of_sunday_goes_back_six_days() {
        assert_eq!(monday_of(date(2024, 6, 9)), date(2024, 6, 3));
    }

    #[test]
    fn monday_of_crosses_month_and_year_boundaries() {
        assert_eq!(monday_of(date(2025, 1, 1)), date(2024, 12, 30));
    }

    #[test]
    fn week_dates_runs_monday_to_sunday() {
        let dates = week_dates(date(2024, 6, 3));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0].weekday(), Weekday::Mon);
        assert_eq!(dates[6], date(2024, 6, 9));
        assert_eq!(dates[6].weekday(), Weekday::Sun);
    }

    #[test]
    fn window_is_half_open() {
        let window = WeekWindow::containing(date(2024, 6, 5));
        assert_eq!(window.start, date(2024, 6, 3));
        assert_eq!(window.end_exclusive, date(2024, 6, 10));
        assert!(window.contains(date(2024, 6, 9)));
        assert!(!window.contains(date(2024, 6, 10)));
        assert!(!window.contains(date(2024, 6, 2)));
    }
}
