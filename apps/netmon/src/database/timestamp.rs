//! Canonical text form for timestamps stored in SQLite.
//!
//! SQLite has no datetime type: ordering and the `date()` grouping used by
//! the daily summary view only work when every row holds the same fixed-width
//! ISO-8601 string. Everything written goes through [`to_storage`].

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// `YYYY-MM-DDTHH:MM:SS.ffffffZ`, always UTC, always microseconds.
pub fn to_storage(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// Also accepts SQLite's own `CURRENT_TIMESTAMP` layout
/// (`YYYY-MM-DD HH:MM:SS[.fff]`, implicitly UTC) for rows not written by us.
pub fn from_storage(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn test_storage_format_is_fixed_width_utc() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(to_storage(&timestamp), "2024-03-09T07:05:01.000000Z");
    }

    #[test]
    fn test_offsets_are_normalized_to_utc() {
        let local = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, 1, 30, 0)
            .unwrap();
        assert_eq!(to_storage(&local.with_timezone(&Utc)), "2023-12-31T23:30:00.000000Z");
    }

    #[test]
    fn test_round_trip_keeps_microseconds() {
        let timestamp = Utc.timestamp_opt(1_700_000_000, 123_456_000).unwrap();
        assert_eq!(from_storage(&to_storage(&timestamp)), Some(timestamp));
    }

    #[test]
    fn test_text_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 9, 30, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap();
        assert!(to_storage(&earlier) < to_storage(&later));
    }

    #[test]
    fn test_accepts_sqlite_current_timestamp() {
        let expected = Utc.with_ymd_and_hms(2021, 1, 2, 16, 39, 17).unwrap();
        assert_eq!(from_storage("2021-01-02 16:39:17"), Some(expected));
    }

    #[test]
    fn test_rejects_trailing_zone_names() {
        assert_eq!(from_storage("2021-01-02 16:39:17.123456789 +0000 UTC"), None);
    }
}
