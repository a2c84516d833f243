//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for log times and record bookkeeping.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parse an RFC 3339 string into a UTC [`Timestamp`].
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTimestamp`] when `value` is not RFC 3339.
pub fn parse(value: &str) -> Result<Timestamp, ValidationError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|_| ValidationError::InvalidTimestamp(value.to_string()))
}

/// Fixed-width RFC 3339 rendering (microseconds, `Z` suffix).
///
/// Lexical order of the output equals chronological order, which the
/// storage layer relies on for `ORDER BY`.
#[must_use]
pub fn to_sortable(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_normalize_offset_to_utc() {
        let ts = parse("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(to_sortable(&ts), "2024-01-01T00:00:00.000000Z");
    }

    #[test]
    fn should_reject_non_rfc3339_input() {
        assert_eq!(
            parse("yesterday"),
            Err(ValidationError::InvalidTimestamp("yesterday".to_string()))
        );
    }

    #[test]
    fn should_sort_lexically_in_chronological_order() {
        let early = parse("2024-01-01T00:00:00.5Z").unwrap();
        let late = parse("2024-01-01T00:00:01Z").unwrap();
        assert!(to_sortable(&early) < to_sortable(&late));
    }
}
