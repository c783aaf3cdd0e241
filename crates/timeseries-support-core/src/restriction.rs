//! Restriction and alignment kernels over sorted timestamps.
//!
//! These are the hot paths behind [`TimeIndexedSeries`](crate::TimeIndexedSeries).
//! They work on plain slices and return row indices, row ranges or counts;
//! the series layer turns those into new series. Preconditions are never
//! re-checked here:
//!
//! - `timestamps` is strictly increasing (validated when a series is built);
//! - interval slices are normalized (guaranteed by [`IntervalSet`](crate::IntervalSet)).
//!
//! Restriction and counting walk the intervals in order and locate each
//! interval's rows with a binary search over the not-yet-consumed suffix of
//! the timestamps, so the timestamp cursor only moves forward. Alignment
//! (`value_from`, interpolation) does one binary search per reference
//! timestamp.

use std::ops::Range;

use crate::{algebra, interval::Interval};

/// Row range `[lo, hi)` of the timestamps falling in each interval.
///
/// Half-open: a timestamp equal to an interval's end is not in that
/// interval's range (it lands in the next interval if one starts there).
pub fn interval_row_ranges(timestamps: &[f64], intervals: &[Interval]) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(intervals.len());
    let mut cursor = 0;

    for iv in intervals {
        let rest = &timestamps[cursor..];
        let lo = cursor + rest.partition_point(|&t| t < iv.start());
        let hi = lo + timestamps[lo..].partition_point(|&t| t < iv.end());
        ranges.push(lo..hi);
        cursor = hi;
    }

    ranges
}

/// Indices of the rows whose timestamp lies inside some interval.
pub fn restrict_indices(timestamps: &[f64], intervals: &[Interval]) -> Vec<usize> {
    interval_row_ranges(timestamps, intervals)
        .into_iter()
        .flatten()
        .collect()
}

/// Number of timestamps inside each interval.
pub fn count_in_bins(timestamps: &[f64], bins: &[Interval]) -> Vec<u64> {
    interval_row_ranges(timestamps, bins)
        .into_iter()
        .map(|r| r.len() as u64)
        .collect()
}

/// For each timestamp, the index of the containing interval.
///
/// Sorted timestamps are resolved with the range sweep; anything else falls
/// back to a binary search per timestamp.
pub fn assign_intervals(timestamps: &[f64], intervals: &[Interval]) -> Vec<Option<usize>> {
    if !timestamps.is_sorted() {
        return timestamps
            .iter()
            .map(|&t| algebra::find_containing(intervals, t))
            .collect();
    }

    let mut out = vec![None; timestamps.len()];
    for (k, range) in interval_row_ranges(timestamps, intervals)
        .into_iter()
        .enumerate()
    {
        for slot in &mut out[range] {
            *slot = Some(k);
        }
    }
    out
}

/// Row providing the value at each reference timestamp, if any.
///
/// The row is the latest sample at or before the reference. It only counts
/// when the reference and the sample lie in the same support interval and,
/// if `max_gap` is given, `reference - sample <= max_gap`.
pub fn value_from_rows(
    timestamps: &[f64],
    support: &[Interval],
    references: &[f64],
    max_gap: Option<f64>,
) -> Vec<Option<usize>> {
    references
        .iter()
        .map(|&r| {
            let epoch = support[algebra::find_containing(support, r)?];
            let idx = timestamps.partition_point(|&t| t <= r);
            let row = idx.checked_sub(1)?;
            let t = timestamps[row];
            if t < epoch.start() {
                return None;
            }
            match max_gap {
                Some(gap) if r - t > gap => None,
                _ => Some(row),
            }
        })
        .collect()
}

/// Two samples bracketing a reference timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Row at or before the reference.
    pub left: usize,
    /// Row at or after the reference (equal to `left` on an exact hit).
    pub right: usize,
    /// Fraction of the way from `left` to `right`, in `[0, 1)`.
    pub weight: f64,
}

/// Interpolation brackets for each reference timestamp.
///
/// A reference gets a bracket only if it lies inside a support interval that
/// also holds both bracketing samples; references before the first or after
/// the last sample of their epoch get `None` (no extrapolation).
pub fn interpolation_brackets(
    timestamps: &[f64],
    support: &[Interval],
    references: &[f64],
) -> Vec<Option<Bracket>> {
    references
        .iter()
        .map(|&r| {
            let epoch = support[algebra::find_containing(support, r)?];
            let idx = timestamps.partition_point(|&t| t <= r);
            let left = idx.checked_sub(1)?;
            let tl = timestamps[left];
            if tl < epoch.start() {
                return None;
            }
            if tl == r {
                return Some(Bracket {
                    left,
                    right: left,
                    weight: 0.0,
                });
            }
            let tr = *timestamps.get(idx)?;
            if !epoch.contains(tr) {
                return None;
            }
            Some(Bracket {
                left,
                right: idx,
                weight: (r - tl) / (tr - tl),
            })
        })
        .collect()
}
