use chrono::prelude::*;

use crate::error::Result;

// Unix timestamp in milliseconds.
pub type Timestamp = i64;

pub const MINUTE_MILLIS: i64 = 60 * 1000;

// Tried in order after RFC 3339. Seconds are optional in ISO-8601.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub trait TimestampTrait {
    fn truncate_to_minute(&self) -> Self;
    fn to_string_millis(&self) -> String;
}

impl TimestampTrait for Timestamp {
    #[inline]
    fn truncate_to_minute(&self) -> Self {
        self.div_euclid(MINUTE_MILLIS) * MINUTE_MILLIS
    }

    fn to_string_millis(&self) -> String {
        match Utc.timestamp_millis_opt(*self).single() {
            Some(ts) => ts.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            None => self.to_string(),
        }
    }
}

/// Parses an ISO-8601 date-time into a `Timestamp`.
///
/// The wall-clock value is what counts: a trailing offset (`Z`, `+01:00`)
/// is accepted but dropped, and zone-less values are read as UTC. The `T`
/// and `Z` designators are case-insensitive.
pub fn parse_iso_time(s: &str) -> Result<Timestamp> {
    let normalized = s.to_ascii_uppercase();

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(from_naive(&dt.naive_local()));
    }

    for format in LOCAL_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(from_naive(&dt));
        }
    }

    Err(format!("couldn't parse ISO-8601 timestamp '{}'", s).into())
}

#[inline]
fn from_naive(dt: &NaiveDateTime) -> Timestamp {
    Utc.from_utc_datetime(dt).timestamp_millis()
}
