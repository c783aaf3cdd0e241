//! Time units and human-friendly durations.
//!
//! Internally every timestamp and interval bound is an `f64` number of
//! seconds. Callers whose raw data is in another unit (for example sample
//! indices converted to milliseconds) declare it with [`TimeUnit`], and bin
//! sizes can be written as short specs such as `"25ms"` or `"1.5s"`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// Unit of raw time values handed to the `*_with` constructors.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Seconds (the internal unit).
    #[default]
    Seconds,
    /// Milliseconds.
    Milliseconds,
    /// Microseconds.
    Microseconds,
    /// Nanoseconds.
    Nanoseconds,
}

impl TimeUnit {
    /// Number of this unit in one second.
    pub const fn per_second(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Milliseconds => 1e3,
            TimeUnit::Microseconds => 1e6,
            TimeUnit::Nanoseconds => 1e9,
        }
    }

    /// Convert a value expressed in this unit to seconds.
    pub fn to_seconds(self, value: f64) -> f64 {
        match self {
            TimeUnit::Seconds => value,
            _ => value / self.per_second(),
        }
    }

    /// Convert a value in seconds to this unit.
    pub fn from_seconds(self, seconds: f64) -> f64 {
        match self {
            TimeUnit::Seconds => seconds,
            _ => seconds * self.per_second(),
        }
    }

    /// Canonical short suffix (`s`, `ms`, `us`, `ns`).
    pub const fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "us",
            TimeUnit::Nanoseconds => "ns",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Errors produced when parsing a time unit name.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseTimeUnitError {
    /// The unit string was empty or only whitespace.
    #[snafu(display("time unit is empty"))]
    EmptyUnit,

    /// The unit is not one of the supported names.
    #[snafu(display("unknown time unit '{unit}' (expected s|ms|us|ns)"))]
    UnknownTimeUnit {
        /// The unrecognized unit.
        unit: String,
    },
}

impl FromStr for TimeUnit {
    type Err = ParseTimeUnitError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let unit = input.trim();
        if unit.is_empty() {
            return Err(ParseTimeUnitError::EmptyUnit);
        }

        match unit.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "ms" | "msec" | "millis" | "millisecond" | "milliseconds" => {
                Ok(TimeUnit::Milliseconds)
            }
            "us" | "µs" | "usec" | "micros" | "microsecond" | "microseconds" => {
                Ok(TimeUnit::Microseconds)
            }
            "ns" | "nsec" | "nanos" | "nanosecond" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            _ => Err(ParseTimeUnitError::UnknownTimeUnit {
                unit: unit.to_string(),
            }),
        }
    }
}

/// Errors produced when parsing a duration spec such as `"25ms"`.
#[derive(Debug, Snafu, PartialEq)]
pub enum ParseDurationError {
    /// The spec string was empty or only whitespace.
    #[snafu(display("duration spec is empty"))]
    Empty,

    /// The spec did not start with a number.
    #[snafu(display("duration spec '{spec}' is missing a numeric value"))]
    MissingNumber {
        /// The original spec string.
        spec: String,
    },

    /// The spec did not include a unit suffix.
    #[snafu(display("duration spec '{spec}' is missing a unit suffix (expected s|ms|us|ns)"))]
    MissingUnit {
        /// The original spec string.
        spec: String,
    },

    /// The numeric portion failed to parse.
    #[snafu(display("invalid duration value in '{spec}': {source}"))]
    InvalidNumber {
        /// The original spec string.
        spec: String,
        /// The parse error returned by `f64::from_str`.
        source: std::num::ParseFloatError,
    },

    /// The parsed value was zero, negative or not finite.
    #[snafu(display("duration must be finite and > 0 (got {value}) in '{spec}'"))]
    NonPositive {
        /// The original spec string.
        spec: String,
        /// The parsed numeric value.
        value: f64,
    },

    /// The unit suffix was not recognized.
    #[snafu(display("unknown unit in duration '{spec}': {source}"))]
    Unit {
        /// The original spec string.
        spec: String,
        /// Underlying unit parse error.
        source: ParseTimeUnitError,
    },
}

/// Parse a human-friendly duration (e.g. `1s`, `25ms`, `0.5 s`, `100us`) into seconds.
///
/// # Errors
/// Returns [`ParseDurationError`] if the spec is empty, missing a number or a
/// unit, has an unparsable or non-positive number, or uses an unknown unit.
pub fn parse_duration(input: &str) -> Result<f64, ParseDurationError> {
    let spec = input.trim();
    if spec.is_empty() {
        return Err(ParseDurationError::Empty);
    }

    // Unit starts at the first alphabetic char; `e`/`E` only counts as an
    // exponent when followed by a digit or sign.
    let bytes = spec.as_bytes();
    let unit_start = spec.char_indices().find(|&(i, c)| {
        if !c.is_alphabetic() && c != 'µ' {
            return false;
        }
        if (c == 'e' || c == 'E') && i > 0 {
            let next = bytes.get(i + 1).copied();
            return !matches!(next, Some(b'0'..=b'9' | b'+' | b'-'));
        }
        true
    });

    let Some((unit_start, _)) = unit_start else {
        return Err(ParseDurationError::MissingUnit {
            spec: spec.to_string(),
        });
    };

    if unit_start == 0 {
        return Err(ParseDurationError::MissingNumber {
            spec: spec.to_string(),
        });
    }

    let (num_str, unit_str) = spec.split_at(unit_start);
    let value: f64 =
        num_str
            .trim()
            .parse()
            .map_err(|source| ParseDurationError::InvalidNumber {
                spec: spec.to_string(),
                source,
            })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(ParseDurationError::NonPositive {
            spec: spec.to_string(),
            value,
        });
    }

    let unit: TimeUnit = unit_str
        .parse()
        .map_err(|source| ParseDurationError::Unit {
            spec: spec.to_string(),
            source,
        })?;

    Ok(unit.to_seconds(value))
}
