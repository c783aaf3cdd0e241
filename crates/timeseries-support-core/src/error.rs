//! Error types and SNAFU context selectors for the engine.
//!
//! All validation happens at construction boundaries (interval sets, series,
//! groups, export records). The restriction and alignment kernels assume
//! sorted, disjoint input and never fail, so every variant below is raised by
//! a constructor or by an argument check at the top of a public operation.

use snafu::prelude::*;

use crate::units::ParseDurationError;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SeriesError> = std::result::Result<T, E>;

/// Errors from constructing or transforming interval sets, series and groups.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SeriesError {
    /// An interval was supplied with `start > end`.
    #[snafu(display("Invalid interval at index {index}: start={start} > end={end}"))]
    InvalidInterval {
        /// Position of the offending pair in the caller's input.
        index: usize,
        /// Supplied start bound.
        start: f64,
        /// Supplied end bound.
        end: f64,
    },

    /// A timestamp or interval bound was NaN or infinite.
    #[snafu(display("Non-finite {what} at index {index}: {value}"))]
    NonFiniteTime {
        /// Which input carried the value (for example `"timestamp"` or `"start"`).
        what: &'static str,
        /// Position of the offending value in the caller's input.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Parallel start/end arrays had different lengths.
    #[snafu(display("Got {starts} interval starts but {ends} ends"))]
    LengthMismatch {
        /// Number of starts supplied.
        starts: usize,
        /// Number of ends supplied.
        ends: usize,
    },

    /// Timestamps were not strictly increasing (this includes duplicates).
    #[snafu(display(
        "Timestamps must be strictly increasing: index {index} has {current} after {previous}"
    ))]
    UnsortedTimestamps {
        /// Position of the first out-of-order timestamp.
        index: usize,
        /// The timestamp preceding it.
        previous: f64,
        /// The out-of-order timestamp.
        current: f64,
    },

    /// An operation that needs at least one interval received an empty support.
    #[snafu(display("Operation '{operation}' requires a non-empty time support"))]
    EmptySupport {
        /// Name of the operation that was attempted.
        operation: &'static str,
    },

    /// An alignment query was issued against a series without samples.
    #[snafu(display("Operation '{operation}' cannot query an empty series"))]
    EmptySeries {
        /// Name of the operation that was attempted.
        operation: &'static str,
    },

    /// The number of value rows does not match the number of timestamps.
    #[snafu(display("Got {timestamps} timestamps but {rows} value rows"))]
    ShapeMismatch {
        /// Number of timestamps supplied.
        timestamps: usize,
        /// Number of rows along the time axis of the values.
        rows: usize,
    },

    /// Bin sizes must be finite and strictly positive.
    #[snafu(display("Bin size must be finite and > 0 (got {bin_size})"))]
    InvalidBinSize {
        /// The rejected bin size in seconds.
        bin_size: f64,
    },

    /// Maximum alignment gaps must be finite and non-negative.
    #[snafu(display("Maximum gap must be finite and >= 0 (got {max_gap})"))]
    InvalidMaxGap {
        /// The rejected gap in seconds.
        max_gap: f64,
    },

    /// A group lookup or removal named a key that is not a member.
    #[snafu(display("No member with key {key} in group"))]
    UnknownKey {
        /// Display form of the missing key.
        key: String,
    },

    /// Flat values could not be reshaped into the declared row shape.
    #[snafu(display("Values do not fit the declared row shape: {source}"))]
    ValueShape {
        /// Underlying ndarray shape error.
        source: ndarray::ShapeError,
    },

    /// A human-readable duration (for example `"25ms"`) failed to parse.
    #[snafu(display("Invalid duration: {source}"))]
    ParseDuration {
        /// Underlying parse error.
        source: ParseDurationError,
    },
}
