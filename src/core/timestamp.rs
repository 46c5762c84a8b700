//! Second-resolution UTC timestamps in the crawler's `2022-01-13T10:59:31Z` format.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wire format of every `created_at` / `closed_at` field
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map(|naive| Self(naive.and_utc()))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Whole seconds elapsed from `self` to `later`; negative when `later` precedes `self`
    pub fn seconds_until(&self, later: &Timestamp) -> i64 {
        (later.0 - self.0).num_seconds()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(|e| {
            serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}"))
        })
    }
}

/// Fractional days from `start` to `end` using an 86400-second day.
///
/// No ordering is enforced: an `end` before `start` yields a negative value.
pub fn days_between(start: &Timestamp, end: &Timestamp) -> f64 {
    start.seconds_until(end) as f64 / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> Timestamp {
        Timestamp::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip_format() {
        let t = ts("2022-01-13T10:59:31Z");
        assert_eq!(t.to_string(), "2022-01-13T10:59:31Z");
    }

    #[test]
    fn test_parse_rejects_offsets_and_fractions() {
        assert!(Timestamp::parse("2022-01-13T10:59:31+00:00").is_err());
        assert!(Timestamp::parse("2022-01-13T10:59:31.5Z").is_err());
        assert!(Timestamp::parse("2022-01-13").is_err());
    }

    #[test]
    fn test_days_between_whole_days() {
        let days = days_between(&ts("2022-01-10T10:00:00Z"), &ts("2022-01-13T10:00:00Z"));
        assert_eq!(days, 3.0);
    }

    #[test]
    fn test_days_between_negative_when_reversed() {
        let days = days_between(&ts("2022-01-13T10:00:00Z"), &ts("2022-01-10T10:00:00Z"));
        assert_eq!(days, -3.0);
    }

    #[test]
    fn test_seconds_until() {
        let a = ts("2022-01-10T10:00:00Z");
        let b = ts("2022-01-10T10:00:05Z");
        assert_eq!(a.seconds_until(&b), 5);
        assert_eq!(b.seconds_until(&a), -5);
    }

    #[test]
    fn test_serde_uses_wire_format() {
        let t: Timestamp = serde_json::from_str("\"2022-01-11T10:00:00Z\"").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"2022-01-11T10:00:00Z\"");
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }
}
