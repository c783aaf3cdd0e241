//! Plain export records for interval sets, series and groups.
//!
//! The records are flat, format-neutral shapes (vectors of numbers and
//! strings) that any storage adapter can serialize: they derive serde's
//! `Serialize`/`Deserialize`, so JSON, MessagePack or a columnar writer can
//! take them as is. Nothing here defines an on-disk layout.
//!
//! Converting a record back goes through the same validating constructors
//! as user input, so a hand-edited or corrupted record fails with the usual
//! [`SeriesError`](crate::SeriesError) variants instead of producing a
//! broken series.
//!
//! # Example
//!
//! ```
//! use timeseries_support_core::TimeIndexedSeries;
//!
//! let s = TimeIndexedSeries::from_scalars(vec![0.0, 1.0], vec![5.0, 6.0], None)?;
//! let record = s.export();
//! assert_eq!(record.values, vec![5.0, 6.0]);
//!
//! let back = TimeIndexedSeries::try_from(record)?;
//! assert_eq!(back, s);
//! # Ok::<(), timeseries_support_core::SeriesError>(())
//! ```

use std::collections::BTreeMap;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, ensure};

use crate::{
    config::SeriesConfig,
    error::{LengthMismatchSnafu, Result, SeriesError, ValueShapeSnafu},
    group::{GroupKey, MetaValue, SeriesGroup},
    interval_set::IntervalSet,
    series::TimeIndexedSeries,
};

/// Interval bounds as parallel start/end arrays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntervalRecord {
    /// Interval starts in seconds.
    pub start: Vec<f64>,
    /// Interval ends in seconds.
    pub end: Vec<f64>,
}

/// A series as flat arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    /// Timestamps in seconds.
    pub timestamps: Vec<f64>,
    /// All values in row-major order.
    pub values: Vec<f64>,
    /// Shape of one row (empty for scalar series).
    pub row_shape: Vec<usize>,
    /// The time support.
    pub support: IntervalRecord,
}

/// A group as keyed series records plus metadata columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Members in key order.
    pub members: Vec<(GroupKey, SeriesRecord)>,
    /// Metadata columns by name, as `(key, value)` cells.
    #[serde(default)]
    pub metadata: BTreeMap<String, Vec<(GroupKey, MetaValue)>>,
}

impl IntervalSet {
    /// Export as parallel start/end arrays.
    pub fn export(&self) -> IntervalRecord {
        IntervalRecord {
            start: self.starts(),
            end: self.ends(),
        }
    }
}

impl TryFrom<IntervalRecord> for IntervalSet {
    type Error = SeriesError;

    fn try_from(record: IntervalRecord) -> Result<Self> {
        ensure!(
            record.start.len() == record.end.len(),
            LengthMismatchSnafu {
                starts: record.start.len(),
                ends: record.end.len(),
            }
        );
        // Exported bounds are already seconds; re-rounding would pull a
        // `next_up` end back onto the last sample.
        let config = SeriesConfig::default().unrounded();
        IntervalSet::from_pairs_with(&config, record.start.into_iter().zip(record.end))
    }
}

impl TimeIndexedSeries {
    /// Export as flat arrays.
    pub fn export(&self) -> SeriesRecord {
        SeriesRecord {
            timestamps: self.timestamps().to_vec(),
            values: self.values().iter().copied().collect(),
            row_shape: self.row_shape().to_vec(),
            support: self.time_support().export(),
        }
    }
}

impl TryFrom<SeriesRecord> for TimeIndexedSeries {
    type Error = SeriesError;

    fn try_from(record: SeriesRecord) -> Result<Self> {
        let mut shape = Vec::with_capacity(record.row_shape.len() + 1);
        shape.push(record.timestamps.len());
        shape.extend_from_slice(&record.row_shape);

        let values =
            ArrayD::from_shape_vec(IxDyn(&shape), record.values).context(ValueShapeSnafu)?;
        let support = IntervalSet::try_from(record.support)?;
        // Timestamps were normalized when the series was built.
        let config = SeriesConfig::default().unrounded();
        TimeIndexedSeries::from_arrays_with(&config, record.timestamps, values, Some(support))
    }
}

impl SeriesGroup {
    /// Export every member and all metadata columns.
    pub fn export(&self) -> GroupRecord {
        GroupRecord {
            members: self
                .iter()
                .map(|(k, s)| (k.clone(), s.export()))
                .collect(),
            metadata: self.metadata().to_records(),
        }
    }
}

impl TryFrom<GroupRecord> for SeriesGroup {
    type Error = SeriesError;

    fn try_from(record: GroupRecord) -> Result<Self> {
        let members = record
            .members
            .into_iter()
            .map(|(k, s)| -> Result<_> { Ok((k, TimeIndexedSeries::try_from(s)?)) })
            .collect::<Result<Vec<_>>>()?;

        let mut group = SeriesGroup::from_mapping(members);
        for (name, cells) in record.metadata {
            group = group.set_info(&name, cells)?;
        }
        Ok(group)
    }
}
