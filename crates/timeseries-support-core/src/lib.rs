//! Core engine for interval-indexed time series.
//!
//! This crate provides the computational pieces behind `timeseries-support`:
//!
//! - Half-open [`Interval`]s and the sweep-based set algebra over sorted,
//!   disjoint interval sequences (`algebra` module).
//! - [`IntervalSet`], the immutable, shareable "time support" a series is
//!   valid on (`interval_set` module).
//! - Restriction, binning and alignment kernels over sorted timestamps
//!   (`restriction` module).
//! - [`TimeIndexedSeries`], which binds timestamps and value rows to a
//!   support, and [`Aligned`] for results that may carry "no data" rows
//!   (`series` module).
//! - [`SeriesGroup`], keyed collections transformed member by member, with
//!   per-member metadata (`group` module).
//! - Flat, serde-ready export records (`export` module).
//!
//! Everything is validated at construction and immutable afterwards; every
//! operation returns a new value. No I/O happens here: file formats, plotting
//! and CLIs belong in crates that depend on this one.
#![deny(missing_docs)]

pub mod algebra;
pub mod config;
pub mod error;
pub mod export;
pub mod group;
pub mod interval;
pub mod interval_set;
pub mod restriction;
pub mod series;
pub mod units;

pub use config::{DEFAULT_TIME_INDEX_PRECISION, SeriesConfig};
pub use error::{Result, SeriesError};
pub use export::{GroupRecord, IntervalRecord, SeriesRecord};
pub use group::{GroupKey, MetaValue, SeriesGroup};
pub use interval::Interval;
pub use interval_set::IntervalSet;
pub use series::{Aligned, ParseThresholdMethodError, ThresholdMethod, TimeIndexedSeries};
pub use units::{ParseDurationError, ParseTimeUnitError, TimeUnit, parse_duration};
