//! Keyed collections of series that are transformed together.
//!
//! A [`SeriesGroup`] maps [`GroupKey`]s to [`TimeIndexedSeries`] (for
//! example unit id to spike train). Members keep their own supports; group
//! operations apply the same arguments to every member independently and
//! return a new group with the same keys. Members are held behind `Arc`, so
//! building a group from another one (select, insert, drop) does not copy
//! any series.

pub mod metadata;

use std::{collections::BTreeMap, fmt, sync::Arc};

use log::trace;
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use snafu::OptionExt;

use crate::{
    error::{Result, UnknownKeySnafu},
    interval_set::IntervalSet,
    restriction,
    series::{self, Aligned, ThresholdMethod, TimeIndexedSeries},
};

pub use metadata::MetaValue;
use metadata::MetaTable;

/// Key of a group member: a numeric index or a name.
///
/// Indices sort before names; within a kind the natural order applies.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    /// Numeric key, for example a unit id.
    Index(i64),
    /// Named key, for example a channel label.
    Name(String),
}

impl From<i64> for GroupKey {
    fn from(v: i64) -> Self {
        GroupKey::Index(v)
    }
}

impl From<&str> for GroupKey {
    fn from(v: &str) -> Self {
        GroupKey::Name(v.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(v: String) -> Self {
        GroupKey::Name(v)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Index(i) => write!(f, "{i}"),
            GroupKey::Name(s) => write!(f, "'{s}'"),
        }
    }
}

/// An ordered, immutable mapping from keys to series plus per-member metadata.
#[derive(Debug, Clone, Default)]
pub struct SeriesGroup {
    members: BTreeMap<GroupKey, Arc<TimeIndexedSeries>>,
    metadata: MetaTable,
}

impl SeriesGroup {
    /// Build a group from `(key, series)` pairs. A repeated key keeps the
    /// last series given for it.
    pub fn from_mapping<K, I>(members: I) -> Self
    where
        K: Into<GroupKey>,
        I: IntoIterator<Item = (K, TimeIndexedSeries)>,
    {
        let members = members
            .into_iter()
            .map(|(k, s)| (k.into(), Arc::new(s)))
            .collect();
        Self {
            members,
            metadata: MetaTable::default(),
        }
    }

    fn with_members(&self, members: BTreeMap<GroupKey, Arc<TimeIndexedSeries>>) -> Self {
        let mut metadata = self.metadata.clone();
        metadata.retain_members(|k| members.contains_key(k));
        Self { members, metadata }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// `true` if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.members.keys()
    }

    /// The member stored under `key`.
    pub fn get(&self, key: &GroupKey) -> Option<&TimeIndexedSeries> {
        self.members.get(key).map(Arc::as_ref)
    }

    /// Iterate over `(key, series)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &TimeIndexedSeries)> {
        self.members.iter().map(|(k, s)| (k, s.as_ref()))
    }

    /// A new group with `series` stored under `key`, replacing any previous
    /// member with that key. Metadata of an existing key is kept.
    pub fn insert(&self, key: impl Into<GroupKey>, series: TimeIndexedSeries) -> SeriesGroup {
        let mut out = self.clone();
        out.members.insert(key.into(), Arc::new(series));
        out
    }

    /// A new group without `key`.
    ///
    /// # Errors
    /// [`SeriesError::UnknownKey`](crate::SeriesError::UnknownKey) if `key`
    /// is not a member.
    pub fn drop_key(&self, key: &GroupKey) -> Result<SeriesGroup> {
        let mut members = self.members.clone();
        members
            .remove(key)
            .context(UnknownKeySnafu { key: key.to_string() })?;
        Ok(self.with_members(members))
    }

    /// Apply `f` to every member, keeping keys and metadata.
    pub fn map<F>(&self, f: F) -> SeriesGroup
    where
        F: Fn(&TimeIndexedSeries) -> TimeIndexedSeries,
    {
        let members = self
            .members
            .iter()
            .map(|(k, s)| {
                trace!("group: transforming member {k}");
                (k.clone(), Arc::new(f(s)))
            })
            .collect();
        self.with_members(members)
    }

    /// Fallible [`map`](Self::map); the first error aborts the whole group.
    pub fn try_map<F>(&self, f: F) -> Result<SeriesGroup>
    where
        F: Fn(&TimeIndexedSeries) -> Result<TimeIndexedSeries>,
    {
        let members: BTreeMap<_, _> = self
            .members
            .iter()
            .map(|(k, s)| -> Result<_> {
                trace!("group: transforming member {k}");
                Ok((k.clone(), Arc::new(f(s)?)))
            })
            .collect::<Result<_>>()?;
        Ok(self.with_members(members))
    }

    /// [`map`](Self::map) with members processed on the rayon thread pool.
    pub fn par_map<F>(&self, f: F) -> SeriesGroup
    where
        F: Fn(&TimeIndexedSeries) -> TimeIndexedSeries + Sync + Send,
    {
        let members = self
            .members
            .par_iter()
            .map(|(k, s)| (k.clone(), Arc::new(f(s))))
            .collect();
        self.with_members(members)
    }

    /// [`try_map`](Self::try_map) with members processed on the rayon thread pool.
    pub fn par_try_map<F>(&self, f: F) -> Result<SeriesGroup>
    where
        F: Fn(&TimeIndexedSeries) -> Result<TimeIndexedSeries> + Sync + Send,
    {
        let members: BTreeMap<_, _> = self
            .members
            .par_iter()
            .map(|(k, s)| -> Result<_> { Ok((k.clone(), Arc::new(f(s)?))) })
            .collect::<Result<_>>()?;
        Ok(self.with_members(members))
    }

    /// Restrict every member to the same `support`.
    ///
    /// Each member is restricted on its own; supports are never combined
    /// across members.
    pub fn restrict_all(&self, support: &IntervalSet) -> SeriesGroup {
        self.map(|s| s.restrict(support))
    }

    /// Per-member counts in `bins`, as a group of count series.
    pub fn count_all(&self, bins: &IntervalSet) -> SeriesGroup {
        self.map(|s| s.count(bins))
    }

    /// Counts as a `bins x members` matrix, columns in key order.
    ///
    /// Zero-length bins are skipped as in [`TimeIndexedSeries::count`], so
    /// row `i` lines up with row `i` of every [`count_all`](Self::count_all)
    /// member.
    pub fn count_matrix(&self, bins: &IntervalSet) -> Array2<u64> {
        let bins = series::countable_bins(bins);
        let columns: Vec<Vec<u64>> = self
            .members
            .values()
            .map(|s| restriction::count_in_bins(s.timestamps(), bins.as_slice()))
            .collect();
        Array2::from_shape_fn((bins.len(), columns.len()), |(row, col)| {
            columns[col][row]
        })
    }

    /// [`TimeIndexedSeries::value_from`] for every member.
    ///
    /// # Errors
    /// The first member error, if any (for example an empty member queried
    /// with non-empty references).
    pub fn value_from_all(
        &self,
        references: &[f64],
        max_gap: Option<f64>,
    ) -> Result<BTreeMap<GroupKey, Aligned>> {
        self.members
            .iter()
            .map(|(k, s)| -> Result<_> { Ok((k.clone(), s.value_from(references, max_gap)?)) })
            .collect()
    }

    /// Union of all member supports; empty for an empty group.
    pub fn union_support(&self) -> IntervalSet {
        self.members
            .values()
            .fold(IntervalSet::empty(), |acc, s| acc.union(s.time_support()))
    }

    /// Time covered by every member's support; empty for an empty group.
    pub fn intersection_support(&self) -> IntervalSet {
        let mut supports = self.members.values().map(|s| s.time_support());
        match supports.next() {
            Some(first) => supports.fold(first.clone(), |acc, s| acc.intersect(s)),
            None => IntervalSet::empty(),
        }
    }

    /// Sampling rate of every member (see [`TimeIndexedSeries::rate`]).
    pub fn rates(&self) -> BTreeMap<GroupKey, Option<f64>> {
        self.members
            .iter()
            .map(|(k, s)| (k.clone(), s.rate()))
            .collect()
    }

    /// A new group with metadata column `name` set for the given members.
    ///
    /// Cells already in the column for other members are kept.
    ///
    /// # Errors
    /// [`SeriesError::UnknownKey`](crate::SeriesError::UnknownKey) if a cell
    /// names a key that is not a member.
    pub fn set_info<K, V, I>(&self, name: &str, cells: I) -> Result<SeriesGroup>
    where
        K: Into<GroupKey>,
        V: Into<MetaValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut column = BTreeMap::new();
        for (key, value) in cells {
            let key = key.into();
            snafu::ensure!(
                self.members.contains_key(&key),
                UnknownKeySnafu { key: key.to_string() }
            );
            column.insert(key, value.into());
        }
        let mut out = self.clone();
        out.metadata.set_column(name, column);
        Ok(out)
    }

    /// Metadata column `name`; members without a value are absent.
    pub fn info(&self, name: &str) -> BTreeMap<GroupKey, MetaValue> {
        self.metadata.column(name).cloned().unwrap_or_default()
    }

    /// Metadata value `name` of member `key`.
    pub fn info_of(&self, key: &GroupKey, name: &str) -> Option<&MetaValue> {
        self.metadata.get(name, key)
    }

    /// Names of all metadata columns.
    pub fn info_names(&self) -> impl Iterator<Item = &str> {
        self.metadata.names()
    }

    /// Members whose value in column `name` satisfies `predicate`.
    /// Members without a value are left out.
    pub fn select_by_info<F>(&self, name: &str, predicate: F) -> SeriesGroup
    where
        F: Fn(&MetaValue) -> bool,
    {
        let members = self
            .members
            .iter()
            .filter(|(k, _)| self.metadata.get(name, k).is_some_and(&predicate))
            .map(|(k, s)| (k.clone(), Arc::clone(s)))
            .collect();
        self.with_members(members)
    }

    /// Members whose rate passes `method` against `threshold`. Members without
    /// a rate are left out.
    pub fn select_by_rate(&self, method: ThresholdMethod, threshold: f64) -> SeriesGroup {
        let members = self
            .members
            .iter()
            .filter(|(_, s)| s.rate().is_some_and(|r| method.test(r, threshold)))
            .map(|(k, s)| (k.clone(), Arc::clone(s)))
            .collect();
        self.with_members(members)
    }

    pub(crate) fn metadata(&self) -> &MetaTable {
        &self.metadata
    }
}

impl PartialEq for SeriesGroup {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata
            && self.members.len() == other.members.len()
            && self
                .members
                .iter()
                .zip(&other.members)
                .all(|((ka, a), (kb, b))| ka == kb && (Arc::ptr_eq(a, b) || a == b))
    }
}

impl<K: Into<GroupKey>> FromIterator<(K, TimeIndexedSeries)> for SeriesGroup {
    fn from_iter<I: IntoIterator<Item = (K, TimeIndexedSeries)>>(iter: I) -> Self {
        Self::from_mapping(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesError;
    use ndarray::array;

    fn spikes(ts: &[f64], support: (f64, f64)) -> TimeIndexedSeries {
        TimeIndexedSeries::from_timestamps(
            ts.to_vec(),
            Some(IntervalSet::single(support.0, support.1).unwrap()),
        )
        .unwrap()
    }

    fn group() -> SeriesGroup {
        SeriesGroup::from_mapping([
            (0i64, spikes(&[1.0, 2.0, 2.5, 7.0], (0.0, 10.0))),
            (1, spikes(&[4.0, 9.0], (2.0, 10.0))),
        ])
    }

    #[test]
    fn keys_are_ordered_and_typed() {
        let g = SeriesGroup::from_mapping([(GroupKey::from("b"), spikes(&[], (0.0, 1.0)))])
            .insert(3i64, spikes(&[], (0.0, 1.0)))
            .insert("a", spikes(&[], (0.0, 1.0)));
        let keys: Vec<String> = g.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["3", "'a'", "'b'"]);
    }

    #[test]
    fn restrict_all_applies_the_same_support_to_each_member() {
        let g = group();
        let support = IntervalSet::from_pairs([(0.0, 3.0), (8.0, 9.5)]).unwrap();
        let r = g.restrict_all(&support);
        assert_eq!(r.len(), 2);
        assert_eq!(r.get(&GroupKey::Index(0)).unwrap().timestamps(), &[1.0, 2.0, 2.5]);
        assert_eq!(r.get(&GroupKey::Index(1)).unwrap().timestamps(), &[9.0]);
        for (_, s) in r.iter() {
            assert!(s.time_support().ptr_eq(&support));
        }
    }

    #[test]
    fn par_map_matches_map() {
        let g = group();
        let bins = IntervalSet::from_pairs([(0.0, 3.0), (3.0, 8.0)]).unwrap();
        let seq = g.map(|s| s.count(&bins));
        let par = g.par_map(|s| s.count(&bins));
        assert_eq!(seq, par);
        assert_eq!(seq, g.count_all(&bins));
    }

    #[test]
    fn try_map_stops_on_error() {
        let g = group();
        assert!(g.try_map(|s| s.count_by(1.0)).is_ok());
        assert!(matches!(
            g.par_try_map(|s| s.count_by(-1.0)),
            Err(SeriesError::InvalidBinSize { .. })
        ));
    }

    #[test]
    fn count_matrix_is_bins_by_members() {
        let bins = IntervalSet::from_pairs([(0.0, 3.0), (3.0, 8.0)]).unwrap();
        assert_eq!(group().count_matrix(&bins), array![[3u64, 0], [1, 1]]);
    }

    #[test]
    fn count_matrix_skips_zero_length_bins_like_count_all() {
        let g = group();
        let bins = IntervalSet::from_pairs([(0.0, 3.0), (3.0, 8.0), (9.0, 9.0)]).unwrap();
        assert_eq!(bins.len(), 3);

        let matrix = g.count_matrix(&bins);
        assert_eq!(matrix, array![[3u64, 0], [1, 1]]);
        for (col, (_, counts)) in g.count_all(&bins).iter().enumerate() {
            assert_eq!(counts.len(), matrix.nrows());
            for (row, &c) in counts.values().iter().enumerate() {
                assert_eq!(c, matrix[[row, col]] as f64);
            }
        }
    }

    #[test]
    fn supports_combine_across_members() {
        let g = group();
        assert_eq!(g.union_support().to_pairs(), vec![(0.0, 10.0)]);
        assert_eq!(g.intersection_support().to_pairs(), vec![(2.0, 10.0)]);
        assert!(SeriesGroup::default().intersection_support().is_empty());

        let rates = g.rates();
        assert_eq!(rates[&GroupKey::Index(0)], Some(0.4));
        assert_eq!(rates[&GroupKey::Index(1)], Some(0.25));
    }

    #[test]
    fn value_from_all_aligns_every_member() {
        let a = TimeIndexedSeries::from_scalars(vec![2.0, 6.0], vec![10.0, 20.0], None).unwrap();
        let b = TimeIndexedSeries::from_scalars(
            vec![0.0],
            vec![1.0],
            Some(IntervalSet::single(0.0, 9.0).unwrap()),
        )
        .unwrap();
        let g = SeriesGroup::from_mapping([("a", a), ("b", b)]);
        let out = g.value_from_all(&[5.0], None).unwrap();
        assert_eq!(out[&GroupKey::from("a")].scalar(0), Some(10.0));
        assert_eq!(out[&GroupKey::from("b")].scalar(0), Some(1.0));
    }

    #[test]
    fn metadata_follows_membership() {
        let g = group()
            .set_info("region", [(0i64, "CA1"), (1, "CA3")])
            .unwrap();
        assert!(matches!(
            g.set_info("region", [(7i64, "CA1")]),
            Err(SeriesError::UnknownKey { .. })
        ));

        let ca1 = g.select_by_info("region", |v| v.as_str() == Some("CA1"));
        assert_eq!(ca1.keys().cloned().collect::<Vec<_>>(), vec![GroupKey::Index(0)]);
        assert!(ca1.info("region").get(&GroupKey::Index(1)).is_none());

        let dropped = g.drop_key(&GroupKey::Index(0)).unwrap();
        assert_eq!(dropped.len(), 1);
        assert_eq!(
            dropped.info_of(&GroupKey::Index(1), "region"),
            Some(&MetaValue::from("CA3"))
        );
        assert!(matches!(
            dropped.drop_key(&GroupKey::Index(0)),
            Err(SeriesError::UnknownKey { .. })
        ));
        assert_eq!(g.info_names().collect::<Vec<_>>(), vec!["region"]);
    }

    #[test]
    fn select_by_rate_filters_members() {
        let fast = group().select_by_rate(ThresholdMethod::Above, 0.3);
        assert_eq!(fast.keys().cloned().collect::<Vec<_>>(), vec![GroupKey::Index(0)]);
    }
}
