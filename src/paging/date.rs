//! Date-time encoding for inter-tier calls.
//!
//! # Design Decisions
//! - One fixed, locale-independent wire format (`dd/MM/yyyy HH:mm:ss`)
//! - Inbound parsing is lenient (ISO-8601, RFC 3339, date-only), outbound is not
//! - Sub-second precision is dropped on parse so every parsed value survives
//!   a trip through the wire format unchanged

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

/// Wire format used for `startDate` / `endDate` on every forwarded call.
pub const CANONICAL_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const DATE_TIME_FORMATS: &[&str] = &[
    CANONICAL_FORMAT,
    "%d/%m/%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Render a date-time in the canonical wire format.
pub fn format_canonical(value: &NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

/// Parse a raw query value into a date-time.
///
/// Offsets in RFC 3339 input are normalized to UTC. Date-only input maps to
/// midnight. Returns `None` for empty or unrecognized input.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    parsed.with_nanosecond(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_canonical_round_trip() {
        let value = at(2024, 1, 31, 23, 59, 58);
        let wire = format_canonical(&value);
        assert_eq!(wire, "31/01/2024 23:59:58");
        assert_eq!(parse(&wire), Some(value));
    }

    #[test]
    fn test_day_comes_before_month() {
        // 02/03 is the 2nd of March, never the 3rd of February
        assert_eq!(parse("02/03/2024 10:00:00"), Some(at(2024, 3, 2, 10, 0, 0)));
    }

    #[test]
    fn test_iso_inputs() {
        assert_eq!(parse("2024-01-01"), Some(at(2024, 1, 1, 0, 0, 0)));
        assert_eq!(parse("2024-01-01T08:30:00"), Some(at(2024, 1, 1, 8, 30, 0)));
        assert_eq!(parse("2024-01-01 08:30:00"), Some(at(2024, 1, 1, 8, 30, 0)));
    }

    #[test]
    fn test_rfc3339_normalized_to_utc() {
        assert_eq!(
            parse("2024-01-01T10:00:00+02:00"),
            Some(at(2024, 1, 1, 8, 0, 0))
        );
        assert_eq!(parse("2024-01-01T10:00:00Z"), Some(at(2024, 1, 1, 10, 0, 0)));
    }

    #[test]
    fn test_sub_seconds_dropped() {
        let value = parse("2024-05-06T07:08:09.987").unwrap();
        assert_eq!(value, at(2024, 5, 6, 7, 8, 9));
        assert_eq!(parse(&format_canonical(&value)), Some(value));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("yesterday"), None);
        assert_eq!(parse("31/02/2024 00:00:00"), None);
    }
}
