//! Shared utility functions for SIP crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};

    /// Date format used by the form inputs and the backend: "YYYY-MM-DD"
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Compact date format used in download file names: "YYYYMMDD"
    pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

    /// Timestamp layouts without an offset. These are read as UTC.
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Format a NaiveDate as "YYYYMMDD"
    pub fn format_date_compact(date: &NaiveDate) -> String {
        date.format(COMPACT_DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map_err(|e| DateError(format!("'{}' is not a YYYY-MM-DD date ({})", s.trim(), e)))
    }

    /// Parse an absolute timestamp as returned by the irradiance backends.
    ///
    /// Accepted layouts, in order:
    /// - RFC 3339 (`2020-01-01T00:00:00Z`, `2020-01-01T00:00:00+02:00`)
    /// - RFC 2822 (`Wed, 01 Jan 2020 00:00:00 GMT`, Flask's default JSON date)
    /// - ISO 8601 without seconds, with `Z` or a `+HH:MM` offset
    /// - ISO 8601 without an offset (`2020-01-01T00:00:00`), read as UTC
    /// - NASA POWER hourly keys (`2020010113`)
    /// - a bare `YYYY-MM-DD`, read as midnight UTC
    ///
    /// Returns `None` when nothing matches.
    pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
            return Some(dt.with_timezone(&Utc));
        }

        let naive_part = s.strip_suffix('Z').unwrap_or(s);
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(naive_part, format) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }

        if s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit()) {
            let date = NaiveDate::parse_from_str(&s[..8], COMPACT_DATE_FORMAT).ok()?;
            let hour = s[8..].parse::<u32>().ok()?;
            return date
                .and_hms_opt(hour, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }

        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// Midnight UTC on the first day of the given month.
    ///
    /// UTC keeps monthly points from sliding into the previous month when
    /// rendered in a timezone west of Greenwich.
    pub fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// Truncate a timestamp to the start of its month (UTC).
    pub fn truncate_to_month(ts: &DateTime<Utc>) -> DateTime<Utc> {
        month_start(ts.year(), ts.month()).unwrap_or(*ts)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{Datelike, TimeZone, Timelike};

        #[test]
        fn test_parse_timestamp_rfc3339() {
            let ts = parse_timestamp("2021-06-15T12:30:00Z").unwrap();
            assert_eq!(ts, Utc.with_ymd_and_hms(2021, 6, 15, 12, 30, 0).unwrap());

            let offset = parse_timestamp("2021-06-15T12:30:00+02:00").unwrap();
            assert_eq!(offset.hour(), 10);
        }

        #[test]
        fn test_parse_timestamp_without_seconds() {
            let ts = parse_timestamp("2020-01-01T00:00Z").unwrap();
            assert_eq!(ts, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        }

        #[test]
        fn test_parse_timestamp_naive_is_utc() {
            let ts = parse_timestamp("2020-03-14T23:00:00").unwrap();
            assert_eq!(ts.day(), 14);
            assert_eq!(ts.hour(), 23);
        }

        #[test]
        fn test_parse_timestamp_rfc2822() {
            let ts = parse_timestamp("Wed, 01 Jan 2020 05:00:00 GMT").unwrap();
            assert_eq!(ts, Utc.with_ymd_and_hms(2020, 1, 1, 5, 0, 0).unwrap());
        }

        #[test]
        fn test_parse_timestamp_nasa_hourly_key() {
            let ts = parse_timestamp("2020010113").unwrap();
            assert_eq!(ts, Utc.with_ymd_and_hms(2020, 1, 1, 13, 0, 0).unwrap());
            assert!(parse_timestamp("2020010125").is_none());
        }

        #[test]
        fn test_parse_timestamp_date_only() {
            let ts = parse_timestamp("2022-02-28").unwrap();
            assert_eq!(ts, Utc.with_ymd_and_hms(2022, 2, 28, 0, 0, 0).unwrap());
        }

        #[test]
        fn test_parse_timestamp_rejects_garbage() {
            assert!(parse_timestamp("").is_none());
            assert!(parse_timestamp("yesterday").is_none());
            assert!(parse_timestamp("2021-13-01T00:00:00").is_none());
        }

        #[test]
        fn test_month_start_and_truncate() {
            let start = month_start(2023, 2).unwrap();
            assert_eq!(start, Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap());
            assert!(month_start(2023, 13).is_none());

            let ts = Utc.with_ymd_and_hms(2023, 2, 17, 9, 45, 0).unwrap();
            assert_eq!(truncate_to_month(&ts), start);
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            assert_eq!(format_date_compact(&date), "20230615");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
            assert!(parse_date("15/06/2023").is_err());
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
