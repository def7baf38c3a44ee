//! Keep/drop filtering of an array under a composite comparator
//!
//! Every element is classified by the smallest index whose element compares
//! equal to it. `unique` keeps exactly the elements that are the first of
//! their equivalence class; `distinct` keeps exactly the rest.

use crate::compare::FieldComparator;
use crate::error::SiftError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Filter policy selecting which members of each equivalence class survive.
///
/// The names keep their historical meaning and are part of the observable
/// contract: `unique` keeps the first occurrence of every group of
/// duplicates (deduplication), while `distinct` keeps only the repeats and
/// drops every first occurrence. A group of size 1 therefore disappears
/// entirely under `distinct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep element `i` iff no earlier element compares equal to it.
    Unique,
    /// Keep element `i` iff an earlier element compares equal to it.
    Distinct,
}

impl FilterMode {
    /// Mode name as it appears in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Unique => "unique",
            FilterMode::Distinct => "distinct",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = SiftError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "unique" => Ok(FilterMode::Unique),
            "distinct" => Ok(FilterMode::Distinct),
            other => Err(SiftError::UnknownMode(other.to_string())),
        }
    }
}

/// Filter `items` under `mode` with a three-way comparator.
///
/// Relative order of kept elements is preserved, no element is duplicated,
/// and the input is left untouched. Comparison cost is O(n²), which is fine
/// at the array sizes this tool targets.
pub fn filter_by<T, F>(items: &[T], mode: FilterMode, compare: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    items
        .iter()
        .enumerate()
        .filter(|(index, item)| {
            let first_match = items
                .iter()
                .position(|candidate| compare(candidate, item) == Ordering::Equal)
                .unwrap_or(*index); // a reflexive comparator always matches the element itself
            match mode {
                FilterMode::Unique => *index == first_match,
                FilterMode::Distinct => *index != first_match,
            }
        })
        .map(|(_, item)| item.clone())
        .collect()
}

/// Filter JSON array elements with a [`FieldComparator`].
pub fn filter(items: &[Value], mode: FilterMode, comparator: &FieldComparator) -> Vec<Value> {
    filter_by(items, mode, |a, b| comparator.compare(a, b))
}
