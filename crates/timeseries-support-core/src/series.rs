//! Timestamped values bound to a time support.
//!
//! A [`TimeIndexedSeries`] pairs strictly increasing timestamps with one row
//! of values per timestamp and an [`IntervalSet`] saying where the data is
//! valid. Values live in an `ndarray::ArrayD<f64>` whose first axis is time,
//! so the same type covers:
//!
//! - timestamp-only series (spike trains): rows of width zero, shape `[n, 0]`;
//! - scalar series: shape `[n]`;
//! - multi-column series: shape `[n, columns]`;
//! - tensor series: shape `[n, d1, d2, ...]`.
//!
//! The row shape is fixed at construction. Every transformation returns a new
//! series; the original is never touched, and the bound support is shared,
//! not copied.

pub mod aligned;
pub mod threshold;

use log::{debug, warn};
use ndarray::{Array1, ArrayD, ArrayViewD, Axis, IxDyn};
use snafu::{ResultExt, ensure};

use crate::{
    config::SeriesConfig,
    error::{
        EmptySeriesSnafu, EmptySupportSnafu, InvalidMaxGapSnafu, NonFiniteTimeSnafu,
        ParseDurationSnafu, Result, ShapeMismatchSnafu, UnsortedTimestampsSnafu,
    },
    interval::Interval,
    interval_set::IntervalSet,
    restriction,
    units::parse_duration,
};

pub use aligned::Aligned;
pub use threshold::{ParseThresholdMethodError, ThresholdMethod};

/// Strictly increasing timestamps, one value row per timestamp, and the time
/// support the rows are valid on.
///
/// # Invariants
/// - timestamps are finite and strictly increasing;
/// - `values.shape()[0] == timestamps.len()`;
/// - every timestamp lies inside `time_support`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndexedSeries {
    timestamps: Vec<f64>,
    values: ArrayD<f64>,
    time_support: IntervalSet,
}

impl TimeIndexedSeries {
    /// Build a series from timestamps (seconds), values and an optional support.
    ///
    /// `values` must have at least one axis, the first being time. Without a
    /// support the series gets `[first, next_up(last))`, the smallest
    /// half-open interval holding every sample. With a support, rows outside
    /// it are dropped.
    ///
    /// # Errors
    /// - [`SeriesError::UnsortedTimestamps`](crate::SeriesError::UnsortedTimestamps)
    ///   if timestamps are not strictly increasing (duplicates included);
    /// - [`SeriesError::NonFiniteTime`](crate::SeriesError::NonFiniteTime) for
    ///   NaN or infinite timestamps;
    /// - [`SeriesError::ShapeMismatch`](crate::SeriesError::ShapeMismatch) if
    ///   the number of value rows differs from the number of timestamps.
    pub fn from_arrays(
        timestamps: Vec<f64>,
        values: ArrayD<f64>,
        support: Option<IntervalSet>,
    ) -> Result<Self> {
        Self::from_arrays_with(&SeriesConfig::default(), timestamps, values, support)
    }

    /// Like [`from_arrays`](Self::from_arrays), converting and rounding raw
    /// timestamps according to `config`.
    ///
    /// The support, if any, is taken as already expressed in seconds.
    pub fn from_arrays_with(
        config: &SeriesConfig,
        timestamps: Vec<f64>,
        values: ArrayD<f64>,
        support: Option<IntervalSet>,
    ) -> Result<Self> {
        let rows = values.shape().first().copied().unwrap_or(0);
        ensure!(
            values.ndim() >= 1 && rows == timestamps.len(),
            ShapeMismatchSnafu {
                timestamps: timestamps.len(),
                rows,
            }
        );

        let timestamps = validate_timestamps(config, timestamps)?;

        let Some(support) = support else {
            let time_support = default_support(&timestamps);
            return Ok(Self::from_parts(timestamps, values, time_support));
        };

        let keep = restriction::restrict_indices(&timestamps, support.as_slice());
        if keep.len() == timestamps.len() {
            return Ok(Self::from_parts(timestamps, values, support));
        }

        warn!(
            "dropping {} of {} samples outside the supplied time support",
            timestamps.len() - keep.len(),
            timestamps.len()
        );
        let timestamps = keep.iter().map(|&i| timestamps[i]).collect();
        let values = values.select(Axis(0), &keep);
        Ok(Self::from_parts(timestamps, values, support))
    }

    /// Build a scalar series from parallel timestamp and value vectors.
    pub fn from_scalars(
        timestamps: Vec<f64>,
        values: Vec<f64>,
        support: Option<IntervalSet>,
    ) -> Result<Self> {
        Self::from_arrays(timestamps, Array1::from(values).into_dyn(), support)
    }

    /// Build a timestamp-only series (for example spike times).
    ///
    /// Rows have width zero: the values array has shape `[n, 0]`.
    pub fn from_timestamps(timestamps: Vec<f64>, support: Option<IntervalSet>) -> Result<Self> {
        let values = ArrayD::zeros(IxDyn(&[timestamps.len(), 0]));
        Self::from_arrays(timestamps, values, support)
    }

    /// Assemble a series whose invariants the caller already guarantees.
    pub(crate) fn from_parts(
        timestamps: Vec<f64>,
        values: ArrayD<f64>,
        time_support: IntervalSet,
    ) -> Self {
        debug_assert_eq!(values.shape()[0], timestamps.len());
        debug_assert!(timestamps.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(timestamps.iter().all(|&t| time_support.contains(t)));
        Self {
            timestamps,
            values,
            time_support,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// `true` if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamps in seconds, strictly increasing.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Values; axis 0 is time.
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Shape of one row (empty for scalar series, `[0]` for timestamp-only).
    pub fn row_shape(&self) -> &[usize] {
        &self.values.shape()[1..]
    }

    /// The value row at position `index`.
    pub fn row(&self, index: usize) -> Option<ArrayViewD<'_, f64>> {
        (index < self.len()).then(|| self.values.index_axis(Axis(0), index))
    }

    /// The support this series is valid on.
    pub fn time_support(&self) -> &IntervalSet {
        &self.time_support
    }

    /// First timestamp.
    pub fn start_time(&self) -> Option<f64> {
        self.timestamps.first().copied()
    }

    /// Last timestamp.
    pub fn end_time(&self) -> Option<f64> {
        self.timestamps.last().copied()
    }

    /// Samples per second of support; `None` when the support has no duration.
    pub fn rate(&self) -> Option<f64> {
        let duration = self.time_support.duration();
        (duration > 0.0).then(|| self.len() as f64 / duration)
    }

    /// Keep only the samples inside `support`; the result is bound to `support`.
    pub fn restrict(&self, support: &IntervalSet) -> TimeIndexedSeries {
        let rows = restriction::restrict_indices(&self.timestamps, support.as_slice());
        debug!(
            "restrict: kept {} of {} samples over {} interval(s)",
            rows.len(),
            self.len(),
            support.len()
        );
        self.select_rows(&rows, support.clone())
    }

    /// Restrict to another series' support.
    ///
    /// The result is bound to the intersection of both supports, so it never
    /// claims validity where this series had none.
    pub fn restrict_to(&self, other: &TimeIndexedSeries) -> TimeIndexedSeries {
        let support = self.time_support.intersect(&other.time_support);
        self.restrict(&support)
    }

    /// Number of samples in each bin, as a series stamped at bin centers.
    ///
    /// Zero-length bins can hold no sample and are skipped. The result is
    /// bound to the (remaining) bins. A bin one ulp wide has no representable
    /// center inside it and is stamped at its start instead.
    pub fn count(&self, bins: &IntervalSet) -> TimeIndexedSeries {
        let bins = countable_bins(bins);

        let counts: Array1<f64> = restriction::count_in_bins(&self.timestamps, bins.as_slice())
            .into_iter()
            .map(|c| c as f64)
            .collect();
        debug!(
            "count: {} of {} samples fell in {} bin(s)",
            counts.sum(),
            self.len(),
            bins.len()
        );

        let stamps = bins.iter().map(bin_stamp).collect();
        TimeIndexedSeries::from_parts(stamps, counts.into_dyn(), bins)
    }

    /// Count samples in uniform bins of `bin_size` seconds over the support.
    ///
    /// # Errors
    /// [`SeriesError::EmptySupport`](crate::SeriesError::EmptySupport) for an
    /// empty support; [`SeriesError::InvalidBinSize`](crate::SeriesError::InvalidBinSize)
    /// for a non-positive bin size.
    pub fn count_by(&self, bin_size: f64) -> Result<TimeIndexedSeries> {
        let bins = self.as_bins(bin_size)?;
        Ok(self.count(&bins))
    }

    /// Like [`count_by`](Self::count_by) with a duration spec such as `"100ms"`.
    pub fn count_per(&self, bin_size: &str) -> Result<TimeIndexedSeries> {
        let bin_size = parse_duration(bin_size).context(ParseDurationSnafu)?;
        self.count_by(bin_size)
    }

    /// Element-wise mean of the rows in each bin.
    ///
    /// Bins without samples are absent in the result rather than zero.
    pub fn bin_average(&self, bins: &IntervalSet) -> Aligned {
        let ranges = restriction::interval_row_ranges(&self.timestamps, bins.as_slice());
        let rows: Vec<Option<ArrayD<f64>>> = ranges
            .into_iter()
            .map(|range| {
                if range.is_empty() {
                    return None;
                }
                self.values
                    .slice_axis(Axis(0), range.into())
                    .mean_axis(Axis(0))
            })
            .collect();
        Aligned::from_rows(bins.centers(), self.row_shape(), rows)
    }

    /// Value at each reference timestamp, taken from the latest sample at or
    /// before it.
    ///
    /// A reference gets no data when it lies outside the support, when the
    /// latest preceding sample belongs to an earlier support interval, or
    /// when that sample is more than `max_gap` seconds old.
    ///
    /// # Errors
    /// [`SeriesError::EmptySeries`](crate::SeriesError::EmptySeries) if this
    /// series has no samples but `references` is non-empty;
    /// [`SeriesError::InvalidMaxGap`](crate::SeriesError::InvalidMaxGap) for a
    /// negative or non-finite gap.
    pub fn value_from(&self, references: &[f64], max_gap: Option<f64>) -> Result<Aligned> {
        if let Some(max_gap) = max_gap {
            ensure!(
                max_gap.is_finite() && max_gap >= 0.0,
                InvalidMaxGapSnafu { max_gap }
            );
        }
        self.ensure_queryable("value_from", references)?;

        let rows = restriction::value_from_rows(
            &self.timestamps,
            self.time_support.as_slice(),
            references,
            max_gap,
        );
        let rows = rows
            .into_iter()
            .map(|row| row.map(|i| self.values.index_axis(Axis(0), i).to_owned()))
            .collect();
        Ok(Aligned::from_rows(references.to_vec(), self.row_shape(), rows))
    }

    /// Linear interpolation at each reference timestamp.
    ///
    /// Only references bracketed by two samples of the same support interval
    /// get a value; nothing is extrapolated.
    ///
    /// # Errors
    /// [`SeriesError::EmptySeries`](crate::SeriesError::EmptySeries) if this
    /// series has no samples but `references` is non-empty.
    pub fn interpolate(&self, references: &[f64]) -> Result<Aligned> {
        self.ensure_queryable("interpolate", references)?;

        let brackets = restriction::interpolation_brackets(
            &self.timestamps,
            self.time_support.as_slice(),
            references,
        );
        let rows = brackets
            .into_iter()
            .map(|bracket| {
                bracket.map(|b| {
                    let left = self.values.index_axis(Axis(0), b.left);
                    if b.left == b.right {
                        return left.to_owned();
                    }
                    let right = self.values.index_axis(Axis(0), b.right);
                    &left * (1.0 - b.weight) + &right * b.weight
                })
            })
            .collect();
        Ok(Aligned::from_rows(references.to_vec(), self.row_shape(), rows))
    }

    /// Keep the rows for which `predicate` holds and derive a narrower support.
    ///
    /// The new support has one interval per maximal run of consecutive kept
    /// rows within a support interval, spanning `[first, next_up(last))` of
    /// the run.
    pub fn threshold<F>(&self, predicate: F) -> TimeIndexedSeries
    where
        F: Fn(ArrayViewD<'_, f64>) -> bool,
    {
        let keep: Vec<bool> = self
            .values
            .axis_iter(Axis(0))
            .map(|row| predicate(row))
            .collect();
        let support = threshold::support_from_runs(&self.timestamps, &self.time_support, &keep);
        let rows: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect();
        debug!(
            "threshold: kept {} of {} samples in {} run(s)",
            rows.len(),
            self.len(),
            support.len()
        );
        self.select_rows(&rows, support)
    }

    /// Threshold every element of each row against `value` using `method`.
    ///
    /// For scalar series this is the usual "above/below" threshold.
    pub fn threshold_by(&self, method: ThresholdMethod, value: f64) -> TimeIndexedSeries {
        self.threshold(|row| row.iter().all(|&x| method.test(x, value)))
    }

    /// Uniform bins of `bin_size` seconds spanning the support.
    ///
    /// # Errors
    /// [`SeriesError::EmptySupport`](crate::SeriesError::EmptySupport) for an
    /// empty support; [`SeriesError::InvalidBinSize`](crate::SeriesError::InvalidBinSize)
    /// for a non-positive bin size.
    pub fn as_bins(&self, bin_size: f64) -> Result<IntervalSet> {
        ensure!(
            !self.time_support.is_empty(),
            EmptySupportSnafu {
                operation: "as_bins"
            }
        );
        self.time_support.split(bin_size)
    }

    fn ensure_queryable(&self, operation: &'static str, references: &[f64]) -> Result<()> {
        ensure!(
            !(self.is_empty() && !references.is_empty()),
            EmptySeriesSnafu { operation }
        );
        Ok(())
    }

    fn select_rows(&self, rows: &[usize], support: IntervalSet) -> TimeIndexedSeries {
        let timestamps = rows.iter().map(|&i| self.timestamps[i]).collect();
        let values = self.values.select(Axis(0), rows);
        TimeIndexedSeries::from_parts(timestamps, values, support)
    }
}

fn validate_timestamps(config: &SeriesConfig, raw: Vec<f64>) -> Result<Vec<f64>> {
    let mut out = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        ensure!(
            value.is_finite(),
            NonFiniteTimeSnafu {
                what: "timestamp",
                index,
                value
            }
        );
        let current = config.normalize_time(value);
        if let Some(&previous) = out.last() {
            ensure!(
                previous < current,
                UnsortedTimestampsSnafu {
                    index,
                    previous,
                    current
                }
            );
        }
        out.push(current);
    }
    Ok(out)
}

/// `bins` without its zero-length intervals.
pub(crate) fn countable_bins(bins: &IntervalSet) -> IntervalSet {
    if bins.iter().any(Interval::is_empty) {
        bins.drop_short(f64::MIN_POSITIVE)
    } else {
        bins.clone()
    }
}

/// Center of `bin`, or its start when the center rounds onto the end.
fn bin_stamp(bin: &Interval) -> f64 {
    let center = bin.center();
    if bin.contains(center) {
        center
    } else {
        bin.start()
    }
}

/// `[first, next_up(last))`, or empty for an empty series.
fn default_support(timestamps: &[f64]) -> IntervalSet {
    match (timestamps.first(), timestamps.last()) {
        (Some(&first), Some(&last)) => {
            IntervalSet::from_normalized(vec![Interval::new_unchecked(first, last.next_up())])
        }
        _ => IntervalSet::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesError;
    use ndarray::{Array2, array};

    fn scalar(ts: &[f64], vs: &[f64]) -> TimeIndexedSeries {
        TimeIndexedSeries::from_scalars(ts.to_vec(), vs.to_vec(), None).unwrap()
    }

    fn set(pairs: &[(f64, f64)]) -> IntervalSet {
        IntervalSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn default_support_includes_last_sample() {
        let s = scalar(&[1.0, 2.0, 4.0], &[0.0, 1.0, 2.0]);
        let span = s.time_support().time_span().unwrap();
        assert_eq!(span.start(), 1.0);
        assert!(span.end() > 4.0);
        assert!(s.time_support().contains(4.0));
        assert_eq!(s.restrict(s.time_support()).len(), 3);
    }

    #[test]
    fn construction_rejects_unsorted_and_duplicate_timestamps() {
        let err = TimeIndexedSeries::from_timestamps(vec![1.0, 3.0, 2.0], None).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::UnsortedTimestamps { index: 2, .. }
        ));

        let err = TimeIndexedSeries::from_timestamps(vec![1.0, 1.0], None).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::UnsortedTimestamps { index: 1, .. }
        ));

        let err = TimeIndexedSeries::from_timestamps(vec![0.0, f64::NAN], None).unwrap_err();
        assert!(matches!(err, SeriesError::NonFiniteTime { index: 1, .. }));
    }

    #[test]
    fn construction_rejects_row_count_mismatch() {
        let err =
            TimeIndexedSeries::from_scalars(vec![1.0, 2.0], vec![1.0], None).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::ShapeMismatch {
                timestamps: 2,
                rows: 1
            }
        ));
    }

    #[test]
    fn supplied_support_drops_outside_rows() {
        let s = TimeIndexedSeries::from_scalars(
            vec![1.0, 4.0, 9.0, 11.0],
            vec![10.0, 40.0, 90.0, 110.0],
            Some(set(&[(0.0, 8.0), (10.0, 12.0)])),
        )
        .unwrap();
        assert_eq!(s.timestamps(), &[1.0, 4.0, 11.0]);
        assert_eq!(s.values(), &array![10.0, 40.0, 110.0].into_dyn());
    }

    #[test]
    fn restrict_binds_the_given_support() {
        let s = TimeIndexedSeries::from_timestamps(vec![1.0, 4.0, 9.0, 11.0], None).unwrap();
        let support = set(&[(0.0, 8.0), (10.0, 12.0)]);
        let r = s.restrict(&support);
        assert_eq!(r.timestamps(), &[1.0, 4.0, 11.0]);
        assert!(r.time_support().ptr_eq(&support));
        assert_eq!(r.row_shape(), &[0]);
        // The source is untouched.
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn restrict_to_intersects_supports() {
        let a = TimeIndexedSeries::from_timestamps(
            vec![1.0, 4.0, 9.0],
            Some(set(&[(0.0, 10.0)])),
        )
        .unwrap();
        let b = TimeIndexedSeries::from_timestamps(vec![3.0, 12.0], Some(set(&[(3.0, 20.0)])))
            .unwrap();
        let r = a.restrict_to(&b);
        assert_eq!(r.timestamps(), &[4.0, 9.0]);
        assert_eq!(r.time_support().to_pairs(), vec![(3.0, 10.0)]);
    }

    #[test]
    fn count_per_bin() {
        let s = TimeIndexedSeries::from_timestamps(vec![1.0, 2.0, 2.5, 7.0], None).unwrap();
        let c = s.count(&set(&[(0.0, 3.0), (3.0, 8.0)]));
        assert_eq!(c.timestamps(), &[1.5, 5.5]);
        assert_eq!(c.values(), &array![3.0, 1.0].into_dyn());
        assert_eq!(c.time_support().len(), 2);
    }

    #[test]
    fn count_over_one_ulp_bins_stays_inside_support() {
        let single = TimeIndexedSeries::from_timestamps(vec![0.3], None).unwrap();
        let c = single.count(single.time_support());
        assert_eq!(c.timestamps(), &[0.3]);
        assert_eq!(c.values(), &array![1.0].into_dyn());
        assert_eq!(c.restrict(c.time_support()).len(), 1);

        let s = scalar(&[0.0, 0.3, 0.6], &[0.0, 1.0, 0.0]);
        let run = s.threshold_by(ThresholdMethod::Above, 0.5);
        assert_eq!(run.time_support().to_pairs(), vec![(0.3, 0.3f64.next_up())]);
        let c = run.count(run.time_support());
        assert_eq!(c.timestamps(), &[0.3]);
        assert!(c.time_support().contains(c.timestamps()[0]));
    }

    #[test]
    fn count_by_bins_the_support() {
        let s = TimeIndexedSeries::from_timestamps(
            vec![0.1, 0.2, 1.5, 2.9],
            Some(set(&[(0.0, 3.0)])),
        )
        .unwrap();
        let c = s.count_by(1.0).unwrap();
        assert_eq!(c.values(), &array![2.0, 1.0, 1.0].into_dyn());
        let c = s.count_per("1500ms").unwrap();
        assert_eq!(c.values(), &array![2.0, 2.0].into_dyn());

        let empty = TimeIndexedSeries::from_timestamps(vec![], None).unwrap();
        assert!(matches!(
            empty.count_by(1.0),
            Err(SeriesError::EmptySupport { .. })
        ));
        assert!(matches!(
            s.count_per("fast"),
            Err(SeriesError::ParseDuration { .. })
        ));
    }

    #[test]
    fn bin_average_marks_empty_bins() {
        let s = scalar(&[0.5, 1.0, 5.0], &[2.0, 4.0, 10.0]);
        let avg = s.bin_average(&set(&[(0.0, 2.0), (2.0, 4.0), (4.0, 6.0)]));
        assert_eq!(avg.to_scalar_options(), vec![Some(3.0), None, Some(10.0)]);
    }

    #[test]
    fn value_from_nearest_preceding() {
        let s = scalar(&[2.0, 6.0], &[10.0, 20.0]);
        let got = s.value_from(&[5.0], None).unwrap();
        assert_eq!(got.scalar(0), Some(10.0));

        let got = s.value_from(&[5.0, 6.0, 1.0], Some(1.0)).unwrap();
        assert_eq!(got.to_scalar_options(), vec![None, Some(20.0), None]);

        assert!(matches!(
            s.value_from(&[5.0], Some(-1.0)),
            Err(SeriesError::InvalidMaxGap { .. })
        ));
    }

    #[test]
    fn alignment_on_empty_series_is_rejected() {
        let empty = TimeIndexedSeries::from_scalars(vec![], vec![], None).unwrap();
        assert!(matches!(
            empty.value_from(&[1.0], None),
            Err(SeriesError::EmptySeries { .. })
        ));
        assert!(matches!(
            empty.interpolate(&[1.0]),
            Err(SeriesError::EmptySeries { .. })
        ));
        assert!(empty.interpolate(&[]).unwrap().is_empty());
    }

    #[test]
    fn interpolate_multi_column_rows() {
        let values = Array2::from_shape_vec((2, 2), vec![0.0, 10.0, 4.0, 30.0])
            .unwrap()
            .into_dyn();
        let s = TimeIndexedSeries::from_arrays(vec![0.0, 4.0], values, None).unwrap();
        let got = s.interpolate(&[1.0, 4.0, 5.0]).unwrap();
        assert_eq!(
            got.get(0).map(|r| r.to_owned()),
            Some(array![1.0, 15.0].into_dyn())
        );
        assert_eq!(
            got.get(1).map(|r| r.to_owned()),
            Some(array![4.0, 30.0].into_dyn())
        );
        assert!(got.get(2).is_none());
    }

    #[test]
    fn threshold_derives_support_from_runs() {
        let s = scalar(
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            &[0.0, 5.0, 6.0, 0.0, 7.0, 0.0],
        );
        let above = s.threshold_by(ThresholdMethod::Above, 1.0);
        assert_eq!(above.timestamps(), &[1.0, 2.0, 4.0]);

        let support = above.time_support();
        assert_eq!(support.len(), 2);
        assert_eq!(support.get(0).map(|iv| iv.start()), Some(1.0));
        assert!(support.contains(2.0) && !support.contains(3.0));
        assert!(support.contains(4.0) && !support.contains(4.5));
        assert!(support.duration() < s.time_support().duration());
    }

    #[test]
    fn rate_and_accessors() {
        let s = TimeIndexedSeries::from_timestamps(
            vec![0.5, 1.0, 3.0, 4.0],
            Some(set(&[(0.0, 2.0), (3.0, 5.0)])),
        )
        .unwrap();
        assert_eq!(s.rate(), Some(1.0));
        assert_eq!(s.start_time(), Some(0.5));
        assert_eq!(s.end_time(), Some(4.0));
        assert!(s.row(3).is_some());
        assert!(s.row(4).is_none());

        let bins = s.as_bins(1.0).unwrap();
        assert_eq!(bins.to_pairs(), vec![(0.0, 1.0), (1.0, 2.0), (3.0, 4.0), (4.0, 5.0)]);
    }
}
