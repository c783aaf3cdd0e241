//! Values aligned onto caller-chosen timestamps.

use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn};

use crate::{error::Result, interval_set::IntervalSet, series::TimeIndexedSeries};

/// Result of aligning a series onto reference timestamps.
///
/// Holds one row per reference. A row is absent where the source had no
/// data (outside its support, across an epoch boundary, beyond a maximum
/// gap, or an empty bin). Absent rows read back as `None`; in the raw
/// [`values`](Self::values) array they are filled with NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Aligned {
    timestamps: Vec<f64>,
    values: ArrayD<f64>,
    present: Vec<bool>,
}

impl Aligned {
    pub(crate) fn from_rows(
        timestamps: Vec<f64>,
        row_shape: &[usize],
        rows: Vec<Option<ArrayD<f64>>>,
    ) -> Self {
        debug_assert_eq!(timestamps.len(), rows.len());

        let mut shape = Vec::with_capacity(row_shape.len() + 1);
        shape.push(rows.len());
        shape.extend_from_slice(row_shape);

        let mut values = ArrayD::from_elem(IxDyn(&shape), f64::NAN);
        let mut present = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            match row {
                Some(row) => {
                    values.index_axis_mut(Axis(0), i).assign(&row);
                    present.push(true);
                }
                None => present.push(false),
            }
        }

        Self {
            timestamps,
            values,
            present,
        }
    }

    /// Reference timestamps, in the order they were given.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Raw values; absent rows are NaN.
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// Number of reference timestamps.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// `true` if there are no reference timestamps.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// `true` if row `index` carries data.
    pub fn is_present(&self, index: usize) -> bool {
        self.present.get(index).copied().unwrap_or(false)
    }

    /// Number of rows carrying data.
    pub fn present_count(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    /// Row `index`, or `None` when out of range or absent.
    pub fn get(&self, index: usize) -> Option<ArrayViewD<'_, f64>> {
        self.is_present(index)
            .then(|| self.values.index_axis(Axis(0), index))
    }

    /// Row `index` as a single number, for rows holding exactly one element.
    pub fn scalar(&self, index: usize) -> Option<f64> {
        let row = self.get(index)?;
        if row.len() == 1 {
            row.iter().next().copied()
        } else {
            None
        }
    }

    /// [`scalar`](Self::scalar) for every row.
    pub fn to_scalar_options(&self) -> Vec<Option<f64>> {
        (0..self.len()).map(|i| self.scalar(i)).collect()
    }

    /// Turn the present rows into a series bound to `support`.
    ///
    /// Rows outside `support` are dropped along with the absent ones.
    ///
    /// # Errors
    /// [`SeriesError::UnsortedTimestamps`](crate::SeriesError::UnsortedTimestamps)
    /// if the reference timestamps of the present rows were not strictly
    /// increasing.
    pub fn into_series(self, support: &IntervalSet) -> Result<TimeIndexedSeries> {
        let rows: Vec<usize> = self
            .present
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| p.then_some(i))
            .collect();
        let timestamps = rows.iter().map(|&i| self.timestamps[i]).collect();
        let values = self.values.select(Axis(0), &rows);
        TimeIndexedSeries::from_arrays(timestamps, values, Some(support.clone()))
    }
}
