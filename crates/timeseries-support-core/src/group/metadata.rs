//! Per-member metadata columns for a [`SeriesGroup`](crate::SeriesGroup).

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use super::GroupKey;

/// A single metadata cell.
///
/// Untagged in serde form, so JSON `true`, `3.5` and `"CA1"` map onto the
/// three variants directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Free text, for example a brain region or a unit label.
    Text(String),
}

impl MetaValue {
    /// The numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The text, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The flag, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Number(v)
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::Text(v.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::Text(v)
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Bool(b) => write!(f, "{b}"),
            MetaValue::Number(v) => write!(f, "{v}"),
            MetaValue::Text(s) => f.write_str(s),
        }
    }
}

/// Named columns of per-member values. A column need not cover every member.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MetaTable {
    columns: BTreeMap<String, BTreeMap<GroupKey, MetaValue>>,
}

impl MetaTable {
    pub(crate) fn set_column(&mut self, name: &str, cells: BTreeMap<GroupKey, MetaValue>) {
        self.columns.entry(name.to_string()).or_default().extend(cells);
    }

    pub(crate) fn column(&self, name: &str) -> Option<&BTreeMap<GroupKey, MetaValue>> {
        self.columns.get(name)
    }

    pub(crate) fn get(&self, name: &str, key: &GroupKey) -> Option<&MetaValue> {
        self.columns.get(name)?.get(key)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Keep only the cells of members for which `keep` holds.
    pub(crate) fn retain_members<F>(&mut self, mut keep: F)
    where
        F: FnMut(&GroupKey) -> bool,
    {
        for cells in self.columns.values_mut() {
            cells.retain(|key, _| keep(key));
        }
    }

    pub(crate) fn to_records(&self) -> BTreeMap<String, Vec<(GroupKey, MetaValue)>> {
        self.columns
            .iter()
            .map(|(name, cells)| {
                let cells = cells.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                (name.clone(), cells)
            })
            .collect()
    }
}
