//! Core event types for heartbeat analysis
//!
//! This module defines the raw heartbeat events accepted as input, their validated form,
//! the millisecond-precision instant type used for all time arithmetic, and the alerts
//! produced by detection.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Timestamp type for consistent time handling across the application
pub type Timestamp = DateTime<Utc>;

/// Largest distance from the Unix epoch, in milliseconds, that an instant may have
const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// Date-time layouts carrying a numeric offset that RFC 3339 parsing does not cover
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
];

/// Date-time layouts without an offset; these are read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// An absolute instant with millisecond precision
///
/// All heartbeat time arithmetic goes through this type: parsing with a validity
/// verdict, whole-second differences, offsetting by (possibly fractional) seconds,
/// and rendering as an ISO-8601 UTC string such as `2025-08-04T10:03:00.000Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeartbeatTime(Timestamp);

impl HeartbeatTime {
    /// Build an instant from milliseconds since the Unix epoch
    ///
    /// Returns `None` when the value lies outside ±8.64e15 ms or outside the range
    /// chrono can represent.
    pub fn from_millis(millis: i64) -> Option<Self> {
        if !(-MAX_EPOCH_MILLIS..=MAX_EPOCH_MILLIS).contains(&millis) {
            return None;
        }
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Build an instant from a chrono timestamp, truncating to whole milliseconds
    ///
    /// Leap seconds (`23:59:60`) are not representable and yield `None`.
    pub fn from_datetime(timestamp: Timestamp) -> Option<Self> {
        if timestamp.nanosecond() >= 1_000_000_000 {
            return None;
        }
        Self::from_millis(timestamp.timestamp_millis())
    }

    /// Parse a JSON timestamp value
    ///
    /// Strings are parsed as date-times (see [`HeartbeatTime::parse_str`]); finite
    /// numbers are milliseconds since the Unix epoch. Every other value is invalid.
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Self::parse_str(text),
            Value::Number(number) => {
                let millis = number.as_f64()?;
                if !millis.is_finite() {
                    return None;
                }
                Self::from_millis(millis.trunc() as i64)
            }
            _ => None,
        }
    }

    /// Parse a date-time string
    ///
    /// Accepts RFC 3339 / ISO-8601 date-times with `Z` or a numeric offset,
    /// date-times without an offset (read as UTC) and bare `YYYY-MM-DD` dates
    /// (midnight UTC). Impossible calendar dates are rejected.
    pub fn parse_str(text: &str) -> Option<Self> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Self::from_datetime(parsed.with_timezone(&Utc));
        }

        for format in OFFSET_FORMATS {
            if let Ok(parsed) = DateTime::parse_from_str(text, format) {
                return Self::from_datetime(parsed.with_timezone(&Utc));
            }
        }

        for format in NAIVE_FORMATS {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
                return Self::from_datetime(parsed.and_utc());
            }
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .and_then(|midnight| Self::from_datetime(midnight.and_utc()))
    }

    /// Milliseconds since the Unix epoch
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Seconds since the Unix epoch, floored
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Whole seconds elapsed since `earlier`, truncated toward zero
    ///
    /// Negative when `earlier` is actually later than `self`.
    pub fn whole_seconds_since(&self, earlier: &HeartbeatTime) -> i64 {
        (self.millis() - earlier.millis()) / 1000
    }

    /// Offset this instant by a number of seconds
    ///
    /// Fractional results are truncated toward zero at millisecond precision.
    /// Returns `None` if the result is not a representable instant.
    pub fn plus_seconds(&self, seconds: f64) -> Option<HeartbeatTime> {
        let millis = self.millis() as f64 + seconds * 1000.0;
        if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS as f64 {
            return None;
        }
        Self::from_millis(millis.trunc() as i64)
    }

    /// Render as an ISO-8601 UTC string with millisecond precision
    ///
    /// Years outside `0..=9999` use the expanded six-digit signed form.
    pub fn to_iso_string(&self) -> String {
        let year = self.0.year();
        if (0..=9999).contains(&year) {
            self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
        } else {
            let sign = if year < 0 { '-' } else { '+' };
            format!(
                "{}{:06}-{}",
                sign,
                year.unsigned_abs(),
                self.0.format("%m-%dT%H:%M:%S%.3fZ")
            )
        }
    }

    /// The underlying chrono timestamp
    pub fn as_datetime(&self) -> Timestamp {
        self.0
    }
}

impl fmt::Display for HeartbeatTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for HeartbeatTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for HeartbeatTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        HeartbeatTime::parse_str(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", text)))
    }
}

/// A raw heartbeat event as supplied by a caller
///
/// Both fields are kept as JSON values so that events read from arbitrary input can
/// carry absent, null or non-text fields; validation decides what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HeartbeatEvent {
    /// Identifier of the service that emitted the heartbeat
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub service: Value,
    /// When the heartbeat was emitted
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub timestamp: Value,
}

impl HeartbeatEvent {
    /// Create an event with a text service and timestamp
    pub fn new(service: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            service: Value::String(service.into()),
            timestamp: Value::String(timestamp.into()),
        }
    }

    /// Create an event that carries no timestamp
    pub fn without_timestamp(service: impl Into<String>) -> Self {
        Self {
            service: Value::String(service.into()),
            timestamp: Value::Null,
        }
    }

    /// Create an event that carries no service
    pub fn without_service(timestamp: impl Into<String>) -> Self {
        Self {
            service: Value::Null,
            timestamp: Value::String(timestamp.into()),
        }
    }

    /// The service identifier, if it is text
    pub fn service_name(&self) -> Option<&str> {
        self.service.as_str()
    }
}

/// A heartbeat event known to carry a non-empty service and a valid instant
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    pub service: String,
    pub time: HeartbeatTime,
    /// The event this was validated from
    pub event: HeartbeatEvent,
}

/// Report that a service missed heartbeats beyond the allowed tolerance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    /// Service whose heartbeats stopped
    pub service: String,
    /// Time of the last heartbeat before the gap plus one expected interval
    pub alert_at: HeartbeatTime,
}
