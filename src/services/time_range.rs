use chrono::{DateTime, Local, TimeZone};

use crate::models::{TimeWindow, MAX_WINDOW_SECS};
use crate::utils::time::start_of_day;

/// Owns the reporting window and keeps it within the 30-day policy.
#[derive(Debug, Clone)]
pub struct TimeRangeController {
    window: TimeWindow,
}

impl TimeRangeController {
    /// Today's local midnight up to now.
    pub fn new() -> Self {
        Self::starting_today(&Local::now())
    }

    pub fn starting_today<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            window: TimeWindow::new(start_of_day(now), now.timestamp()),
        }
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Replaces the window, clamping anything longer than 30 days to the
    /// most recent 30 days ending at `end`. Returns the stored window so the
    /// caller can reflect a correction back into its own display.
    pub fn set_window(&mut self, start: i64, end: i64) -> TimeWindow {
        let (start, end) = if end < start { (end, start) } else { (start, end) };

        self.window = if end.saturating_sub(start) > MAX_WINDOW_SECS {
            let clamped_start = end.saturating_sub(MAX_WINDOW_SECS);
            tracing::debug!(
                requested_start = start,
                start = clamped_start,
                end,
                "Clamped reporting window to 30 days"
            );
            TimeWindow::new(clamped_start, end)
        } else {
            TimeWindow::new(start, end)
        };

        self.window
    }

    pub fn set_range<Tz: TimeZone>(&mut self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> TimeWindow {
        self.set_window(start.timestamp(), end.timestamp())
    }
}

impl Default for TimeRangeController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    const DAY: i64 = 24 * 60 * 60;
    const T: i64 = 1_700_000_000;

    #[test]
    fn test_window_within_limit_is_unchanged() {
        let mut controller = TimeRangeController::starting_today(&Utc::now());
        for duration in [0, 1, DAY, 29 * DAY, 30 * DAY] {
            let window = controller.set_window(T, T + duration);
            assert_eq!(window, TimeWindow::new(T, T + duration));
            assert_eq!(controller.window(), window);
        }
    }

    #[test]
    fn test_long_window_is_clamped_to_end() {
        let mut controller = TimeRangeController::starting_today(&Utc::now());
        let window = controller.set_window(T, T + 40 * DAY);
        assert_eq!(window, TimeWindow::new(T + 10 * DAY, T + 40 * DAY));
        assert_eq!(window.duration_secs(), Some(MAX_WINDOW_SECS));
    }

    #[test]
    fn test_one_second_over_is_clamped() {
        let mut controller = TimeRangeController::starting_today(&Utc::now());
        let window = controller.set_window(T, T + 30 * DAY + 1);
        assert_eq!(window, TimeWindow::new(T + 1, T + 30 * DAY + 1));
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let mut controller = TimeRangeController::starting_today(&Utc::now());
        let window = controller.set_window(T + DAY, T);
        assert_eq!(window, TimeWindow::new(T, T + DAY));
    }

    #[test]
    fn test_default_window_starts_at_local_midnight() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 1, 17, 45, 12).unwrap();
        let controller = TimeRangeController::starting_today(&now);

        let midnight = tz.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            controller.window(),
            TimeWindow::new(midnight.timestamp(), now.timestamp())
        );
    }

    #[test]
    fn test_set_range_from_datetimes() {
        let mut controller = TimeRangeController::starting_today(&Utc::now());
        let start = Utc.timestamp_opt(T, 0).unwrap();
        let end = Utc.timestamp_opt(T + 60 * DAY, 0).unwrap();
        let window = controller.set_range(&start, &end);
        assert_eq!(window.start, Some(T + 30 * DAY));
    }

    #[test]
    fn test_extreme_bounds_are_clamped() {
        let mut controller = TimeRangeController::starting_today(&Utc::now());
        let window = controller.set_window(i64::MIN, i64::MAX);
        assert_eq!(window, TimeWindow::new(i64::MAX - MAX_WINDOW_SECS, i64::MAX));

        let start = crate::utils::time::parse_timestamp("-9223372036854775808").unwrap();
        let end = crate::utils::time::parse_timestamp("9223372036854775807").unwrap();
        let window = controller.set_window(end, start);
        assert_eq!(window.end, Some(i64::MAX));
        assert_eq!(window.duration_secs(), Some(MAX_WINDOW_SECS));
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_short_windows_are_unchanged(
            start in i64::MIN..=i64::MAX - MAX_WINDOW_SECS,
            duration in 0..=MAX_WINDOW_SECS,
        ) {
            let mut controller = TimeRangeController::starting_today(&Utc::now());
            let window = controller.set_window(start, start + duration);
            prop_assert_eq!(window, TimeWindow::new(start, start + duration));
        }

        #[test]
        fn prop_window_never_exceeds_limit(a in any::<i64>(), b in any::<i64>()) {
            let mut controller = TimeRangeController::starting_today(&Utc::now());
            let window = controller.set_window(a, b);
            let (start, end) = (window.start.unwrap(), window.end.unwrap());

            prop_assert_eq!(end, a.max(b));
            prop_assert!(start >= a.min(b));
            prop_assert!(start <= end);
            prop_assert!(end.saturating_sub(start) <= MAX_WINDOW_SECS);
        }
    }
}
