use chrono::{DateTime, NaiveDate, Utc};

use crate::error::TypeError;

/// Parse a content timestamp.
///
/// Accepts RFC 3339 (`2026-01-26T00:00:00.000Z`) or a bare calendar date
/// (`2026-01-26`), which is read as midnight UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, TypeError> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TypeError::InvalidTimestamp(s.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parses_rfc3339_with_millis() {
        let ts = parse_timestamp("2026-01-26T00:00:00.000Z").unwrap();
        assert_eq!(ts.year(), 2026);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 26);
    }

    #[test]
    fn converts_offsets_to_utc() {
        let ts = parse_timestamp("2026-01-26T05:00:00-05:00").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let ts = parse_timestamp("2025-12-01").unwrap();
        assert_eq!((ts.hour(), ts.minute()), (0, 0));
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_timestamp("yesterday"),
            Err(TypeError::InvalidTimestamp("yesterday".into()))
        );
    }
}
