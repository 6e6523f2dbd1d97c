use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Longest reporting interval the usage service accepts: 30 days.
pub const MAX_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

/// Reporting interval in epoch seconds. `None` (or a non-positive value)
/// leaves that side unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Lower bound, if it is a usable timestamp.
    pub fn start_secs(&self) -> Option<i64> {
        self.start.filter(|s| *s > 0)
    }

    /// Upper bound, if it is a usable timestamp.
    pub fn end_secs(&self) -> Option<i64> {
        self.end.filter(|e| *e > 0)
    }

    pub fn duration_secs(&self) -> Option<i64> {
        match (self.start_secs(), self.end_secs()) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }

    pub fn start_utc(&self) -> Option<DateTime<Utc>> {
        self.start_secs().and_then(|s| Utc.timestamp_opt(s, 0).single())
    }

    pub fn end_utc(&self) -> Option<DateTime<Utc>> {
        self.end_secs().and_then(|e| Utc.timestamp_opt(e, 0).single())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_bounds_are_unbounded() {
        let window = TimeWindow::new(0, 0);
        assert_eq!(window.start_secs(), None);
        assert_eq!(window.end_secs(), None);
        assert_eq!(window.duration_secs(), None);
    }

    #[test]
    fn test_duration() {
        let window = TimeWindow::new(1_700_000_000, 1_700_086_400);
        assert_eq!(window.duration_secs(), Some(86_400));
        assert_eq!(window.end_utc().unwrap().timestamp(), 1_700_086_400);
    }

    #[test]
    fn test_duration_saturates() {
        let window = TimeWindow::new(1, i64::MAX);
        assert_eq!(window.duration_secs(), Some(i64::MAX - 1));
    }
}
