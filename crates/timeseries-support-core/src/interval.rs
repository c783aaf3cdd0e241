//! The half-open time interval `[start, end)`.

use std::fmt;

use serde::{Deserialize, Serialize};
use snafu::ensure;

use crate::error::{InvalidIntervalSnafu, NonFiniteTimeSnafu, Result};

/// A half-open interval `[start, end)` in seconds.
///
/// The start is inclusive and the end exclusive, so a timestamp equal to
/// `end` belongs to whatever interval starts there, never to this one.
/// Zero-length intervals (`start == end`) are valid and contain no timestamp.
///
/// # Invariants
/// `start <= end` and both bounds are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    /// Creates a new interval, validating the bounds.
    ///
    /// # Errors
    /// [`SeriesError::InvalidInterval`](crate::SeriesError::InvalidInterval)
    /// if `start > end`, and
    /// [`SeriesError::NonFiniteTime`](crate::SeriesError::NonFiniteTime) if
    /// either bound is NaN or infinite.
    pub fn new(start: f64, end: f64) -> Result<Self> {
        Self::checked(0, start, end)
    }

    pub(crate) fn checked(index: usize, start: f64, end: f64) -> Result<Self> {
        ensure!(
            start.is_finite(),
            NonFiniteTimeSnafu {
                what: "start",
                index,
                value: start
            }
        );
        ensure!(
            end.is_finite(),
            NonFiniteTimeSnafu {
                what: "end",
                index,
                value: end
            }
        );
        ensure!(start <= end, InvalidIntervalSnafu { index, start, end });
        Ok(Self { start, end })
    }

    /// Creates an interval without validation in release builds.
    ///
    /// Used by the algebra, whose outputs are valid by construction.
    #[inline]
    pub(crate) fn new_unchecked(start: f64, end: f64) -> Self {
        debug_assert!(start <= end, "interval start {start} > end {end}");
        Self { start, end }
    }

    /// Inclusive start bound.
    #[inline]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Exclusive end bound.
    #[inline]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// `end - start`.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the interval.
    #[inline]
    pub fn center(&self) -> f64 {
        self.start + (self.end - self.start) / 2.0
    }

    /// `true` for zero-length intervals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `true` if `t` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// `true` if the two intervals share a non-empty overlap.
    #[inline]
    pub fn intersects(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `true` if the two intervals overlap or touch at a boundary.
    #[inline]
    pub fn intersects_or_adjacent(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// `(start, end)` pair.
    #[inline]
    pub const fn as_pair(&self) -> (f64, f64) {
        (self.start, self.end)
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = crate::SeriesError;

    fn try_from((start, end): (f64, f64)) -> Result<Self> {
        Interval::new(start, end)
    }
}

impl From<Interval> for (f64, f64) {
    fn from(iv: Interval) -> Self {
        iv.as_pair()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesError;

    #[test]
    fn new_validates_order_and_finiteness() {
        assert!(Interval::new(0.0, 1.0).is_ok());
        assert!(Interval::new(2.0, 2.0).is_ok());

        let err = Interval::new(3.0, 1.0).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidInterval { index: 0, .. }));

        let err = Interval::new(f64::NAN, 1.0).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::NonFiniteTime { what: "start", .. }
        ));
        let err = Interval::new(0.0, f64::INFINITY).unwrap_err();
        assert!(matches!(err, SeriesError::NonFiniteTime { what: "end", .. }));
    }

    #[test]
    fn half_open_membership() {
        let iv = Interval::new(1.0, 4.0).unwrap();
        assert!(iv.contains(1.0));
        assert!(iv.contains(3.999));
        assert!(!iv.contains(4.0));
        assert!(!iv.contains(0.5));

        let empty = Interval::new(2.0, 2.0).unwrap();
        assert!(empty.is_empty());
        assert!(!empty.contains(2.0));
        assert_eq!(empty.duration(), 0.0);
    }

    #[test]
    fn overlap_and_adjacency() {
        let a = Interval::new(0.0, 10.0).unwrap();
        let b = Interval::new(10.0, 20.0).unwrap();
        let c = Interval::new(5.0, 15.0).unwrap();

        assert!(!a.intersects(&b));
        assert!(a.intersects_or_adjacent(&b));
        assert!(a.intersects(&c));
        assert_eq!(c.center(), 10.0);
        assert_eq!(a.to_string(), "[0, 10)");
    }

    #[test]
    fn serde_goes_through_validation() {
        let iv: Interval = serde_json::from_str("[1.0, 2.5]").unwrap();
        assert_eq!(iv.as_pair(), (1.0, 2.5));
        assert_eq!(serde_json::to_string(&iv).unwrap(), "[1.0,2.5]");
        assert!(serde_json::from_str::<Interval>("[3.0, 1.0]").is_err());
    }
}
