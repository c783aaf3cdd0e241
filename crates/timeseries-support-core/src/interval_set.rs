//! Validated, immutable sets of disjoint half-open intervals.
//!
//! An [`IntervalSet`] is the "time support" of a series: the epochs over
//! which its samples are defined. It is always sorted and disjoint, and it is
//! never mutated after construction. Storage is an `Arc<[Interval]>`, so
//! cloning a set (for example to bind it to many series) is a reference-count
//! bump and sharing across threads needs no synchronization.
//!
//! Typical usage:
//!
//! ```
//! use timeseries_support_core::IntervalSet;
//!
//! let epochs = IntervalSet::from_pairs([(0.0, 5.0), (3.0, 8.0), (10.0, 12.0)])?;
//! assert_eq!(epochs.to_pairs(), vec![(0.0, 8.0), (10.0, 12.0)]);
//!
//! let sleep = IntervalSet::from_pairs([(6.0, 11.0)])?;
//! assert_eq!(epochs.intersect(&sleep).to_pairs(), vec![(6.0, 8.0), (10.0, 11.0)]);
//! assert_eq!(epochs.duration(), 10.0);
//! # Ok::<(), timeseries_support_core::SeriesError>(())
//! ```

use std::{fmt, sync::Arc};

use log::warn;
use snafu::ensure;

use crate::{
    algebra,
    config::SeriesConfig,
    error::{InvalidBinSizeSnafu, LengthMismatchSnafu, Result},
    interval::Interval,
    restriction,
};

/// An ordered collection of pairwise-disjoint `[start, end)` intervals.
#[derive(Clone, PartialEq)]
pub struct IntervalSet {
    intervals: Arc<[Interval]>,
}

impl IntervalSet {
    /// The set with no intervals.
    pub fn empty() -> Self {
        Self {
            intervals: Arc::from(Vec::new()),
        }
    }

    /// A set holding exactly `[start, end)`.
    ///
    /// # Errors
    /// Fails if `start > end` or a bound is not finite.
    pub fn single(start: f64, end: f64) -> Result<Self> {
        Ok(Self::from_normalized(vec![Interval::new(start, end)?]))
    }

    /// Build a set from raw `(start, end)` pairs in seconds.
    ///
    /// Input may be unsorted and overlapping; overlapping pairs are merged
    /// (with a warning). Pairs that merely touch stay separate.
    ///
    /// # Errors
    /// [`SeriesError::InvalidInterval`](crate::SeriesError::InvalidInterval)
    /// if any pair has `start > end`;
    /// [`SeriesError::NonFiniteTime`](crate::SeriesError::NonFiniteTime) for
    /// NaN or infinite bounds.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::from_pairs_with(&SeriesConfig::default(), pairs)
    }

    /// Like [`from_pairs`](Self::from_pairs), converting and rounding the raw
    /// bounds according to `config`.
    pub fn from_pairs_with<I>(config: &SeriesConfig, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let intervals = pairs
            .into_iter()
            .enumerate()
            .map(|(index, (start, end))| {
                Interval::checked(
                    index,
                    config.normalize_time(start),
                    config.normalize_time(end),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_intervals(intervals))
    }

    /// Build a set from parallel arrays of starts and ends.
    ///
    /// # Errors
    /// [`SeriesError::LengthMismatch`](crate::SeriesError::LengthMismatch) if
    /// the arrays differ in length, plus everything
    /// [`from_pairs`](Self::from_pairs) rejects.
    pub fn new(starts: &[f64], ends: &[f64]) -> Result<Self> {
        ensure!(
            starts.len() == ends.len(),
            LengthMismatchSnafu {
                starts: starts.len(),
                ends: ends.len(),
            }
        );
        Self::from_pairs(starts.iter().copied().zip(ends.iter().copied()))
    }

    /// Build a set from already-validated intervals, normalizing them.
    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        let (intervals, merged) = algebra::normalize(intervals);
        if merged > 0 {
            warn!("merged {merged} overlapping interval(s) while building an interval set");
        }
        Self::from_normalized(intervals)
    }

    pub(crate) fn from_normalized(intervals: Vec<Interval>) -> Self {
        debug_assert!(algebra::is_normalized(&intervals));
        Self {
            intervals: Arc::from(intervals),
        }
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// `true` if the set holds no interval.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Borrow the intervals in order.
    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterate over the intervals in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// Interval at position `index`.
    pub fn get(&self, index: usize) -> Option<Interval> {
        self.intervals.get(index).copied()
    }

    /// Start bounds, in order.
    pub fn starts(&self) -> Vec<f64> {
        self.intervals.iter().map(Interval::start).collect()
    }

    /// End bounds, in order.
    pub fn ends(&self) -> Vec<f64> {
        self.intervals.iter().map(Interval::end).collect()
    }

    /// Interval midpoints, in order.
    pub fn centers(&self) -> Vec<f64> {
        self.intervals.iter().map(Interval::center).collect()
    }

    /// `(start, end)` pairs, in order.
    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.intervals.iter().map(Interval::as_pair).collect()
    }

    /// Start of the first interval.
    pub fn first_start(&self) -> Option<f64> {
        self.intervals.first().map(Interval::start)
    }

    /// End of the last interval.
    pub fn last_end(&self) -> Option<f64> {
        self.intervals.last().map(Interval::end)
    }

    /// The single interval from the first start to the last end.
    pub fn time_span(&self) -> Option<Interval> {
        match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => Some(Interval::new_unchecked(first.start(), last.end())),
            _ => None,
        }
    }

    /// Total covered time: the sum of `end - start`.
    pub fn duration(&self) -> f64 {
        algebra::total_duration(&self.intervals)
    }

    /// Union; touching or overlapping intervals are merged.
    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        Self::from_normalized(algebra::union(&self.intervals, &other.intervals))
    }

    /// Intersection.
    pub fn intersect(&self, other: &IntervalSet) -> IntervalSet {
        Self::from_normalized(algebra::intersection(&self.intervals, &other.intervals))
    }

    /// Coverage of `self` not covered by `other`.
    pub fn set_diff(&self, other: &IntervalSet) -> IntervalSet {
        Self::from_normalized(algebra::difference(&self.intervals, &other.intervals))
    }

    /// Merge consecutive intervals whose gap is at most `gap` seconds.
    pub fn merge_close(&self, gap: f64) -> IntervalSet {
        Self::from_normalized(algebra::merge_close(&self.intervals, gap))
    }

    /// Drop intervals shorter than `min_duration` seconds.
    pub fn drop_short(&self, min_duration: f64) -> IntervalSet {
        Self::from_normalized(algebra::drop_short(&self.intervals, min_duration))
    }

    /// Drop intervals longer than `max_duration` seconds.
    pub fn drop_long(&self, max_duration: f64) -> IntervalSet {
        Self::from_normalized(algebra::drop_long(&self.intervals, max_duration))
    }

    /// The parts of `within` not covered by this set.
    pub fn complement(&self, within: Interval) -> IntervalSet {
        Self::from_normalized(algebra::complement(&self.intervals, within))
    }

    /// Split every interval into consecutive bins of `bin_size` seconds.
    ///
    /// The final bin of each interval is clipped to its end, so the result
    /// partitions this set.
    ///
    /// # Errors
    /// [`SeriesError::InvalidBinSize`](crate::SeriesError::InvalidBinSize) if
    /// `bin_size` is not finite and positive.
    pub fn split(&self, bin_size: f64) -> Result<IntervalSet> {
        ensure!(
            bin_size.is_finite() && bin_size > 0.0,
            InvalidBinSizeSnafu { bin_size }
        );
        Ok(Self::from_normalized(algebra::split(
            &self.intervals,
            bin_size,
        )))
    }

    /// `true` if some interval contains `t`.
    pub fn contains(&self, t: f64) -> bool {
        algebra::contains(&self.intervals, t)
    }

    /// Index of the interval containing `t`.
    pub fn find(&self, t: f64) -> Option<usize> {
        algebra::find_containing(&self.intervals, t)
    }

    /// For each timestamp, the index of its containing interval, or `None`.
    ///
    /// Sorted input is matched with a single linear sweep; unsorted input
    /// falls back to one binary search per timestamp.
    pub fn in_interval(&self, timestamps: &[f64]) -> Vec<Option<usize>> {
        restriction::assign_intervals(timestamps, &self.intervals)
    }

    /// `true` if both sets share the same underlying storage.
    pub fn ptr_eq(&self, other: &IntervalSet) -> bool {
        Arc::ptr_eq(&self.intervals, &other.intervals)
    }
}

impl Default for IntervalSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        Self::from_intervals(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.intervals.iter()).finish()
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, iv) in self.intervals.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{iv}")?;
        }
        f.write_str("}")
    }
}
