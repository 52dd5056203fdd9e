//! Calendar age of a manifest's `lastUpdated` date

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Parse an ISO-8601 `lastUpdated` value.
///
/// Accepts a full RFC 3339 timestamp, a zone-less date-time (read as UTC)
/// or a bare date (midnight UTC).
#[must_use]
pub fn parse_last_updated(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Whole days between `last_updated` and `now`, rounded down.
///
/// Returns `None` if the date cannot be parsed.
#[must_use]
pub fn days_since_update(last_updated: &str, now: DateTime<Utc>) -> Option<i64> {
    let updated = parse_last_updated(last_updated)?;
    let elapsed = now.signed_duration_since(updated).num_milliseconds();
    Some(elapsed.div_euclid(MILLIS_PER_DAY))
}
