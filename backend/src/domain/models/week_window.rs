//! Sunday-to-Saturday week windows.
//!
//! Windows are computed on the local wall clock (`NaiveDateTime`); no time
//! zone conversion happens here. Every instant belongs to exactly one window
//! and consecutive windows share no instant.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

const LABEL_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl WeekWindow {
    /// Window containing the given local instant.
    pub fn containing(instant: NaiveDateTime) -> Self {
        Self::containing_date(instant.date())
    }

    /// Window containing the given local calendar date.
    pub fn containing_date(date: NaiveDate) -> Self {
        let days_since_sunday = i64::from(date.weekday().num_days_from_sunday());
        // Only the first days of the representable range can fail here
        let start_date = date
            .checked_sub_signed(Duration::days(days_since_sunday))
            .unwrap_or(NaiveDate::MIN);
        let start = start_date.and_time(NaiveTime::MIN);
        let end = start
            .checked_add_signed(Duration::days(7) - Duration::milliseconds(1))
            .unwrap_or(NaiveDateTime::MAX);

        Self { start, end }
    }

    /// Sunday 00:00:00.000 opening the window.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Saturday 23:59:59.999 closing the window (inclusive).
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Window `weeks` weeks away; negative values go back in time.
    ///
    /// Shifts that leave the representable date range return `self`.
    pub fn shift(&self, weeks: i64) -> Self {
        if weeks == 0 {
            return *self;
        }
        weeks
            .checked_mul(7)
            .and_then(Duration::try_days)
            .and_then(|delta| self.start.checked_add_signed(delta))
            .map(Self::containing)
            .unwrap_or(*self)
    }

    /// Inclusive on both ends. Instants in the final millisecond after `end`
    /// (sub-millisecond precision) still belong to this window.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        within_range(instant, self.start, self.end)
    }

    pub fn is_after(&self, other: &WeekWindow) -> bool {
        self.start > other.start
    }

    /// Whole weeks from `other` to `self` (negative when `self` is earlier).
    pub fn weeks_since(&self, other: &WeekWindow) -> i64 {
        self.start.signed_duration_since(other.start).num_days() / 7
    }

    /// Deterministic display label, e.g. `2/25/2024 - 3/2/2024`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format(LABEL_DATE_FORMAT),
            self.end.format(LABEL_DATE_FORMAT)
        )
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Free-function form of [`WeekWindow::containing`].
pub fn window_containing(instant: NaiveDateTime) -> WeekWindow {
    WeekWindow::containing(instant)
}

/// Range test shared by [`WeekWindow::contains`] and the order stores.
/// `end` is a millisecond-precision inclusive bound, so anything before the
/// next millisecond still matches.
pub fn within_range(instant: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    instant >= start && instant.signed_duration_since(end) < Duration::milliseconds(1)
}

/// Free-function form of [`WeekWindow::shift`].
pub fn shift(window: &WeekWindow, weeks: i64) -> WeekWindow {
    window.shift(weeks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn every_day(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        from.iter_days().take_while(move |d| *d <= to)
    }

    #[test]
    fn test_start_is_sunday_midnight_and_end_is_saturday_last_instant() {
        let from = NaiveDate::from_ymd_opt(2023, 11, 20).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        for date in every_day(from, to) {
            let window = window_containing(date.and_hms_opt(13, 45, 0).unwrap());

            assert_eq!(window.start().weekday(), Weekday::Sun, "date {}", date);
            assert_eq!(window.start().time(), NaiveTime::MIN);
            assert_eq!(window.end().weekday(), Weekday::Sat, "date {}", date);
            assert_eq!(window.end().hour(), 23);
            assert_eq!(window.end().minute(), 59);
            assert_eq!(window.end().second(), 59);
            assert_eq!(window.end().nanosecond(), 999_000_000);
            assert_eq!(window.end_date() - window.start_date(), Duration::days(6));
            assert!(window.start_date() <= date && date <= window.end_date());
        }
    }

    #[test]
    fn test_same_span_gives_equal_windows() {
        let sunday_morning = at(2024, 12, 29, 0, 0, 0);
        let saturday_night = NaiveDate::from_ymd_opt(2025, 1, 4)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        let new_year = at(2025, 1, 1, 9, 30, 0);

        assert_eq!(window_containing(sunday_morning), window_containing(saturday_night));
        assert_eq!(window_containing(sunday_morning), window_containing(new_year));
        assert_ne!(
            window_containing(saturday_night),
            window_containing(at(2025, 1, 5, 0, 0, 0))
        );
    }

    #[test]
    fn test_leap_year_month_boundary() {
        let window = window_containing(at(2024, 3, 1, 21, 0, 0));

        assert_eq!(window.start_date(), NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(window.end_date(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert!(window.contains(at(2024, 2, 29, 12, 0, 0)));
        assert_eq!(window.label(), "2/25/2024 - 3/2/2024");
    }

    #[test]
    fn test_year_boundary() {
        let window = window_containing(at(2025, 1, 1, 8, 0, 0));

        assert_eq!(window.start(), at(2024, 12, 29, 0, 0, 0));
        assert_eq!(window.end_date(), NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
        assert_eq!(window.to_string(), "12/29/2024 - 1/4/2025");
    }

    #[test]
    fn test_shift_round_trip() {
        let window = window_containing(at(2024, 7, 17, 10, 0, 0));

        for n in -120..=120 {
            let shifted = shift(&window, n);
            assert_eq!(shift(&shifted, -n), window, "n = {}", n);
            assert_eq!(shifted.weeks_since(&window), n);
        }
        assert_eq!(window.shift(0), window);
    }

    #[test]
    fn test_windows_tile_without_gaps() {
        let mut window = window_containing(at(2023, 12, 31, 0, 0, 0));

        for _ in 0..60 {
            let next = window.shift(1);
            assert_eq!(next.start() - window.end(), Duration::milliseconds(1));
            assert!(!window.contains(next.start()));
            assert!(!next.contains(window.end()));
            window = next;
        }
    }

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let window = window_containing(at(2024, 5, 15, 12, 0, 0));
        let just_before = window.start() - Duration::milliseconds(1);
        let sub_millisecond_tail = window.end() + Duration::microseconds(500);

        assert!(window.contains(window.start()));
        assert!(window.contains(window.end()));
        assert!(window.contains(sub_millisecond_tail));
        assert!(!window.contains(just_before));
        assert!(!window.contains(window.shift(1).start()));
        assert!(within_range(sub_millisecond_tail, window.start(), window.end()));
        assert!(!within_range(window.shift(1).start(), window.start(), window.end()));
    }

    #[test]
    fn test_extreme_shift_does_not_panic() {
        let window = window_containing(at(2024, 5, 15, 12, 0, 0));

        assert_eq!(window.shift(i64::MAX), window);
        assert_eq!(window.shift(i64::MIN), window);
        assert!(window.shift(-1).is_after(&window.shift(-2)));
    }
}
