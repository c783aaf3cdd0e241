//! Construction-time configuration.
//!
//! [`SeriesConfig`] describes how raw time values are interpreted before they
//! enter the engine: which unit they are expressed in and how many decimal
//! places of a second are kept. It is plain data (serde-friendly) so that I/O
//! adapters can carry it alongside the arrays they load.

use serde::{Deserialize, Serialize};

use crate::units::TimeUnit;

/// Default number of decimal places kept for timestamps (nanoseconds).
pub const DEFAULT_TIME_INDEX_PRECISION: u32 = 9;

/// How raw timestamps and interval bounds are normalized at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeriesConfig {
    /// Unit of the raw values; they are converted to seconds.
    #[serde(default)]
    pub time_unit: TimeUnit,

    /// Decimal places (of a second) that timestamps and bounds are rounded to.
    ///
    /// `None` keeps raw `f64` values untouched. Rounding happens before the
    /// strict-monotonicity check, so two samples closer than the precision are
    /// reported as duplicates.
    #[serde(default = "default_precision")]
    pub time_index_precision: Option<u32>,
}

fn default_precision() -> Option<u32> {
    Some(DEFAULT_TIME_INDEX_PRECISION)
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            time_unit: TimeUnit::Seconds,
            time_index_precision: default_precision(),
        }
    }
}

impl SeriesConfig {
    /// Config for raw values expressed in `unit`, default precision.
    pub fn with_unit(time_unit: TimeUnit) -> Self {
        Self {
            time_unit,
            ..Self::default()
        }
    }

    /// Config that keeps raw values without rounding.
    pub fn unrounded(self) -> Self {
        Self {
            time_index_precision: None,
            ..self
        }
    }

    /// Convert one raw value to seconds and apply the configured rounding.
    pub fn normalize_time(&self, raw: f64) -> f64 {
        let secs = self.time_unit.to_seconds(raw);
        match self.time_index_precision {
            Some(digits) => round_to(secs, digits),
            None => secs,
        }
    }
}

fn round_to(value: f64, digits: u32) -> f64 {
    // Beyond ~15 significant digits rounding is a no-op for f64.
    if digits >= 15 || !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rounds_to_nanoseconds() {
        let cfg = SeriesConfig::default();
        assert_eq!(cfg.time_index_precision, Some(9));
        assert_eq!(cfg.normalize_time(1.000_000_000_4), 1.0);
        assert_eq!(cfg.normalize_time(0.25), 0.25);
    }

    #[test]
    fn unit_conversion_happens_before_rounding() {
        let cfg = SeriesConfig::with_unit(TimeUnit::Milliseconds);
        assert_eq!(cfg.normalize_time(1500.0), 1.5);

        let cfg = SeriesConfig::with_unit(TimeUnit::Seconds).unrounded();
        assert_eq!(cfg.normalize_time(1.000_000_000_4), 1.000_000_000_4);
    }

    #[test]
    fn deserializes_with_defaults() {
        let cfg: SeriesConfig = serde_json::from_str(r#"{"time_unit":"milliseconds"}"#).unwrap();
        assert_eq!(cfg.time_unit, TimeUnit::Milliseconds);
        assert_eq!(cfg.time_index_precision, Some(9));

        let cfg: SeriesConfig =
            serde_json::from_str(r#"{"time_index_precision":null}"#).unwrap();
        assert_eq!(cfg, SeriesConfig::default().unrounded());
    }
}
