//! # timeseries-support
//!
//! Irregularly timestamped series indexed against explicit time supports.
//!
//! This crate is the supported public entry point and provides a small, stable
//! surface over `timeseries-support-core`.
//!
//! ## Example
//!
//! ```rust
//! use timeseries_support::prelude::*;
//!
//! let spikes = TimeIndexedSeries::from_timestamps(vec![1.0, 4.0, 9.0, 11.0], None)?;
//! let epochs = IntervalSet::from_pairs([(0.0, 8.0), (10.0, 12.0)])?;
//!
//! let kept = spikes.restrict(&epochs);
//! assert_eq!(kept.timestamps(), &[1.0, 4.0, 11.0]);
//! # Ok::<(), SeriesError>(())
//! ```

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

/// Interval algebra over raw interval slices.
pub mod algebra {
    pub use timeseries_support_core::algebra::*;
}

/// Export records for storage adapters.
pub mod export {
    pub use timeseries_support_core::export::{GroupRecord, IntervalRecord, SeriesRecord};
}

pub use timeseries_support_core::config::{DEFAULT_TIME_INDEX_PRECISION, SeriesConfig};
pub use timeseries_support_core::error::{Result, SeriesError};
pub use timeseries_support_core::group::{GroupKey, MetaValue, SeriesGroup};
pub use timeseries_support_core::interval::Interval;
pub use timeseries_support_core::interval_set::IntervalSet;
pub use timeseries_support_core::series::{
    Aligned, ParseThresholdMethodError, ThresholdMethod, TimeIndexedSeries,
};
pub use timeseries_support_core::units::{
    ParseDurationError, ParseTimeUnitError, TimeUnit, parse_duration,
};
