//! Filter engine
//!
//! Two independent passes over a record collection: exact set-membership
//! filters (OR within a column, AND across columns) and case-insensitive
//! substring search filters. Both passes are pure set intersections, so their
//! composition order does not matter and applying them twice is a no-op.

use std::collections::BTreeMap;

use serde_json::Value;

use super::Record;
use super::value::scalar_key;

/// Parsed filter state for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Column to accepted canonical values (set membership, OR within column).
    pub exact: BTreeMap<String, Vec<String>>,
    /// Column to substring pattern.
    pub search: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.search.is_empty()
    }
}

/// Apply both filter passes. Pure and non-mutating.
pub fn apply_filters(items: &[Record], filters: &FilterSet) -> Vec<Record> {
    items
        .iter()
        .filter(|r| matches_exact(r, &filters.exact, None) && matches_search(r, &filters.search))
        .cloned()
        .collect()
}

/// Apply only the exact pass, optionally leaving one column's constraint out.
/// The facet counter uses the skip to compute leave-one-out base sets.
pub fn apply_exact(
    items: &[Record],
    exact: &BTreeMap<String, Vec<String>>,
    skip_column: Option<&str>,
) -> Vec<Record> {
    items
        .iter()
        .filter(|r| matches_exact(r, exact, skip_column))
        .cloned()
        .collect()
}

fn matches_exact(
    record: &Record,
    exact: &BTreeMap<String, Vec<String>>,
    skip_column: Option<&str>,
) -> bool {
    exact
        .iter()
        .filter(|(column, _)| skip_column != Some(column.as_str()))
        .all(|(column, accepted)| {
            let key = scalar_key(record.get(column));
            accepted.iter().any(|v| *v == key)
        })
}

fn matches_search(record: &Record, search: &BTreeMap<String, String>) -> bool {
    search.iter().all(|(column, pattern)| match record.get(column) {
        Some(Value::String(s)) => s.to_lowercase().contains(&pattern.to_lowercase()),
        other => scalar_key(other) == *pattern,
    })
}
