//! Lenient timestamp decoding.
//!
//! The backend serialises with Python's `isoformat()`, which yields naive
//! timestamps (`2025-03-01T14:05:09.123456`). A few endpoints were later
//! changed to emit an explicit offset, so both shapes are accepted and the
//! offset variant is reduced to its local wall-clock time.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a backend timestamp; `None` for empty or unrecognised text.
pub fn parse_backend_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_backend_datetime(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
    }
}

pub fn serialize_opt<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_isoformat_with_micros() {
        let dt = parse_backend_datetime("2025-03-01T14:05:09.123456").unwrap();
        assert_eq!(dt.format("%d/%m/%Y %H:%M:%S").to_string(), "01/03/2025 14:05:09");
    }

    #[test]
    fn test_parse_with_offset_keeps_wall_clock() {
        let dt = parse_backend_datetime("2025-03-01T14:05:09-03:00").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "14:05");
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_backend_datetime("2025-03-01").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-03-01 00:00");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_backend_datetime("ontem").is_none());
        assert!(parse_backend_datetime("  ").is_none());
    }
}
