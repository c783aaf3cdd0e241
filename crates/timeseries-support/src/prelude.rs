//! Wrapper prelude.
//!
//! The `timeseries-support` crate is the supported public entry point.
//! Downstream code should prefer importing from this prelude instead of
//! depending on internal core module paths.

pub use crate::export;
pub use crate::{
    Aligned, GroupKey, Interval, IntervalSet, MetaValue, SeriesConfig, SeriesError, SeriesGroup,
    ThresholdMethod, TimeIndexedSeries, TimeUnit, parse_duration,
};
