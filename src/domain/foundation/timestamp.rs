//! Timestamp value object for immutable points in time.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format used by the billing gateways and the subscriptions table.
pub const GATEWAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A gateway date string that is not a valid `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampParseError {
    #[error("expected YYYY-MM-DD HH:MM:SS, got {0:?}")]
    Layout(String),

    #[error("invalid date: {0}")]
    OutOfRange(#[from] chrono::ParseError),
}

/// Zero-padded fields, single separators, nothing before or after.
fn has_gateway_layout(value: &str) -> bool {
    value.len() == 19
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            10 => b == b' ',
            13 | 16 => b == b':',
            _ => b.is_ascii_digit(),
        })
}

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a naive value stored as UTC.
    pub fn from_naive_utc(naive: NaiveDateTime) -> Self {
        Self(naive.and_utc())
    }

    /// Parses a `YYYY-MM-DD HH:MM:SS` string, interpreted as UTC.
    ///
    /// The layout is matched exactly: no surrounding whitespace, no
    /// unpadded fields.
    pub fn parse_gateway(value: &str) -> Result<Self, TimestampParseError> {
        if !has_gateway_layout(value) {
            return Err(TimestampParseError::Layout(value.to_string()));
        }
        let naive = NaiveDateTime::parse_from_str(value, GATEWAY_DATETIME_FORMAT)?;
        Ok(Self::from_naive_utc(naive))
    }

    /// Returns the UTC wall-clock value for DATETIME columns.
    pub fn to_naive_utc(&self) -> NaiveDateTime {
        self.0.naive_utc()
    }

    /// Formats the timestamp in the gateway wire format.
    pub fn to_gateway_string(&self) -> String {
        self.0.format(GATEWAY_DATETIME_FORMAT).to_string()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    #[cfg(test)]
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + chrono::Duration::days(days))
    }

    #[cfg(test)]
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - chrono::Duration::days(days))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now().naive_utc();
        let ts = Timestamp::now();
        let after = Utc::now().naive_utc();

        assert!(ts.to_naive_utc() >= before);
        assert!(ts.to_naive_utc() <= after);
    }

    #[test]
    fn parse_gateway_reads_wire_format_as_utc() {
        let ts = Timestamp::parse_gateway("2025-06-01 13:45:09").unwrap();
        let dt = ts.to_naive_utc();

        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 6, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (13, 45, 9));
    }

    #[test]
    fn parse_gateway_rejects_other_formats() {
        assert!(Timestamp::parse_gateway("2025-06-01T00:00:00Z").is_err());
        assert!(Timestamp::parse_gateway("2025-06-01").is_err());
        assert!(Timestamp::parse_gateway("").is_err());
        assert!(Timestamp::parse_gateway("2025-13-01 00:00:00").is_err());
    }

    #[test]
    fn parse_gateway_matches_layout_exactly() {
        for value in [
            " 2025-06-01 00:00:00",
            "2025-06-01 00:00:00\n",
            "2025-6-01 00:00:00",
            "2025-06-01  0:00:00",
        ] {
            assert!(
                matches!(
                    Timestamp::parse_gateway(value),
                    Err(TimestampParseError::Layout(_))
                ),
                "accepted {:?}",
                value
            );
        }
    }

    #[test]
    fn parse_gateway_rejects_impossible_dates() {
        assert!(matches!(
            Timestamp::parse_gateway("2025-02-30 00:00:00"),
            Err(TimestampParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn gateway_string_matches_parsed_input() {
        let ts = Timestamp::parse_gateway("2025-01-01 00:00:00").unwrap();
        assert_eq!(ts.to_gateway_string(), "2025-01-01 00:00:00");
    }

    #[test]
    fn naive_utc_preserves_wall_clock() {
        let ts = Timestamp::parse_gateway("2024-02-29 23:59:59").unwrap();
        let naive = ts.to_naive_utc();
        assert_eq!(Timestamp::from_naive_utc(naive), ts);
        assert_eq!(naive.to_string(), "2024-02-29 23:59:59");
    }

    #[test]
    fn day_arithmetic_orders_correctly() {
        let now = Timestamp::now();
        assert!(now.minus_days(1).is_before(&now));
        assert!(now.is_before(&now.add_days(1)));
    }
}
