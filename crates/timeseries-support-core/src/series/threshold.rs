//! Threshold predicates and the supports they imply.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::{interval::Interval, interval_set::IntervalSet, restriction};

/// Comparison applied by [`TimeIndexedSeries::threshold_by`](crate::TimeIndexedSeries::threshold_by).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMethod {
    /// Keep values strictly above the threshold.
    Above,
    /// Keep values at or above the threshold.
    AboveOrEqual,
    /// Keep values strictly below the threshold.
    Below,
    /// Keep values at or below the threshold.
    BelowOrEqual,
}

impl ThresholdMethod {
    /// `true` if `value` passes against `threshold`. NaN never passes.
    #[inline]
    pub fn test(self, value: f64, threshold: f64) -> bool {
        match self {
            ThresholdMethod::Above => value > threshold,
            ThresholdMethod::AboveOrEqual => value >= threshold,
            ThresholdMethod::Below => value < threshold,
            ThresholdMethod::BelowOrEqual => value <= threshold,
        }
    }
}

impl fmt::Display for ThresholdMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThresholdMethod::Above => "above",
            ThresholdMethod::AboveOrEqual => "aboveequal",
            ThresholdMethod::Below => "below",
            ThresholdMethod::BelowOrEqual => "belowequal",
        })
    }
}

/// Error returned when a threshold method name is not recognized.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display(
    "unknown threshold method '{method}' (expected above|aboveequal|below|belowequal)"
))]
pub struct ParseThresholdMethodError {
    method: String,
}

impl FromStr for ThresholdMethod {
    type Err = ParseThresholdMethodError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "above" | ">" => Ok(ThresholdMethod::Above),
            "aboveequal" | ">=" => Ok(ThresholdMethod::AboveOrEqual),
            "below" | "<" => Ok(ThresholdMethod::Below),
            "belowequal" | "<=" => Ok(ThresholdMethod::BelowOrEqual),
            _ => Err(ParseThresholdMethodError {
                method: input.trim().to_string(),
            }),
        }
    }
}

/// Support implied by the kept rows.
///
/// One interval per maximal run of consecutive kept rows inside a single
/// support interval, spanning `[first, next_up(last))` of the run.
pub(crate) fn support_from_runs(
    timestamps: &[f64],
    support: &IntervalSet,
    keep: &[bool],
) -> IntervalSet {
    debug_assert_eq!(timestamps.len(), keep.len());

    let mut runs = Vec::new();
    for range in restriction::interval_row_ranges(timestamps, support.as_slice()) {
        let mut run_start: Option<usize> = None;
        for i in range.clone() {
            match (keep[i], run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(first)) => {
                    runs.push(run_interval(timestamps, first, i - 1));
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(first) = run_start {
            runs.push(run_interval(timestamps, first, range.end - 1));
        }
    }

    IntervalSet::from_normalized(runs)
}

fn run_interval(timestamps: &[f64], first: usize, last: usize) -> Interval {
    Interval::new_unchecked(timestamps[first], timestamps[last].next_up())
}
