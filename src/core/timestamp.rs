//! Timestamp extraction from free-form log lines.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

static ISO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z)").unwrap());
static STANDARD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d+)").unwrap());
static TIME_ONLY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2}:\d{2}:\d{2}\.\d+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimestampFormat {
    Iso,
    Standard,
    TimeOnly,
}

impl TimestampFormat {
    const ALL: [TimestampFormat; 3] = [
        TimestampFormat::Iso,
        TimestampFormat::Standard,
        TimestampFormat::TimeOnly,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            TimestampFormat::Iso => &*ISO_PATTERN,
            TimestampFormat::Standard => &*STANDARD_PATTERN,
            TimestampFormat::TimeOnly => &*TIME_ONLY_PATTERN,
        }
    }

    fn parse(self, raw: &str, reference_date: NaiveDate) -> Option<DateTime<Utc>> {
        match self {
            TimestampFormat::Iso => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            TimestampFormat::Standard => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc()),
            TimestampFormat::TimeOnly => NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
                .ok()
                .map(|time| reference_date.and_time(time).and_utc()),
        }
    }
}

/// Extract the first recognisable timestamp from a log line.
///
/// Formats are tried in order: ISO-8601 with `Z`, `YYYY-MM-DD HH:MM:SS.f`
/// (read as UTC), then a bare `HH:MM:SS.f` placed on `reference_date`. When a
/// match does not form a valid date or time the next format is tried.
pub fn parse_timestamp(line: &str, reference_date: NaiveDate) -> Option<DateTime<Utc>> {
    TimestampFormat::ALL.iter().find_map(|format| {
        let captures = format.pattern().captures(line)?;
        format.parse(&captures[1], reference_date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    }

    #[test]
    fn test_iso_timestamp() {
        let line = "2025-07-09T14:02:11.123456Z  INFO fedimint_client: joining federation";
        let ts = parse_timestamp(line, reference()).unwrap();

        assert_eq!(ts.year(), 2025);
        assert_eq!(ts.day(), 9);
        assert_eq!(ts.hour(), 14);
        assert_eq!(ts.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_standard_timestamp_is_utc() {
        let line = "2025-07-09 08:00:01.5 WARN retrying";
        let ts = parse_timestamp(line, reference()).unwrap();

        assert_eq!(ts.to_rfc3339(), "2025-07-09T08:00:01.500+00:00");
    }

    #[test]
    fn test_time_only_uses_reference_date() {
        let line = "[12:30:45.250] peer connected";
        let ts = parse_timestamp(line, reference()).unwrap();

        assert_eq!(ts.date_naive(), reference());
        assert_eq!(ts.minute(), 30);
        assert_eq!(ts.second(), 45);
    }

    #[test]
    fn test_invalid_iso_falls_back_to_time_only() {
        let line = "2025-13-45T10:11:12.000Z bogus month";
        let ts = parse_timestamp(line, reference()).unwrap();

        assert_eq!(ts.date_naive(), reference());
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn test_fraction_is_required() {
        assert!(parse_timestamp("2025-07-09T14:02:11Z no fraction", reference()).is_none());
        assert!(parse_timestamp("no timestamp here", reference()).is_none());
    }
}
