use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::errors::{AppError, Result};

/// Epoch seconds of 00:00:00 on the calendar day of `now`, in `now`'s zone.
///
/// When local midnight does not exist (DST gap at 00:00) the earliest valid
/// instant of that day is used instead.
pub fn start_of_day<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let tz = now.timezone();
    let date = now.date_naive();
    for hour in 0..24 {
        if let Some(naive) = date.and_hms_opt(hour, 0, 0) {
            if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
                return dt.timestamp();
            }
        }
    }
    now.timestamp()
}

/// Parses a user-supplied instant: epoch seconds, RFC 3339, or
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DD` in the local zone.
pub fn parse_timestamp(input: &str) -> Result<i64> {
    parse_timestamp_in(input, &Local)
}

pub fn parse_timestamp_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<i64> {
    let s = input.trim();
    if let Ok(secs) = s.parse::<i64>() {
        return Ok(secs);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp());
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| AppError::InvalidTimestamp(input.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| AppError::InvalidTimestamp(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_start_of_day_fixed_offset() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        // 2023-11-15 09:30:00 +08:00
        let now = tz.with_ymd_and_hms(2023, 11, 15, 9, 30, 0).unwrap();
        let midnight = tz.with_ymd_and_hms(2023, 11, 15, 0, 0, 0).unwrap();
        assert_eq!(start_of_day(&now), midnight.timestamp());
    }

    #[test]
    fn test_start_of_day_at_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(start_of_day(&now), now.timestamp());
    }

    #[test]
    fn test_parse_epoch_and_rfc3339() {
        assert_eq!(parse_timestamp_in("1700000000", &Utc).unwrap(), 1_700_000_000);
        assert_eq!(
            parse_timestamp_in("2023-11-14T22:13:20Z", &Utc).unwrap(),
            1_700_000_000
        );
    }

    #[test]
    fn test_parse_naive_uses_zone() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(
            parse_timestamp_in("2023-11-14 23:13:20", &tz).unwrap(),
            1_700_000_000
        );
        assert_eq!(
            parse_timestamp_in("2023-11-15", &Utc).unwrap(),
            Utc.with_ymd_and_hms(2023, 11, 15, 0, 0, 0).unwrap().timestamp()
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_timestamp_in("yesterday", &Utc),
            Err(AppError::InvalidTimestamp(_))
        ));
    }
}
