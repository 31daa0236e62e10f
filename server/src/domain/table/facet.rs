//! Facet option computation
//!
//! For every facet-eligible column, compute the full value domain from the
//! unfiltered collection, count occurrences under leave-one-out filtering
//! (every exact constraint applied except the column's own), and order the
//! options by a fixed four-level policy. Counts partition the leave-one-out
//! base set exactly because domain keys and match keys come from the same
//! canonical key function.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use utoipa::ToSchema;

use super::Record;
use super::filter::apply_exact;
use super::value::{collation_key, encode_value, scalar_key};

/// One selectable value of a facet column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacetOption {
    /// Canonical value, with the empty string rewritten to the wire token.
    pub value: String,
    /// Matches within the leave-one-out base set.
    pub count: u64,
    pub is_available: bool,
    pub is_empty: bool,
}

/// Compute facet options for every column in `facet_columns`.
pub fn compute_facets(
    all_items: &[Record],
    exact: &BTreeMap<String, Vec<String>>,
    facet_columns: &[String],
) -> BTreeMap<String, Vec<FacetOption>> {
    facet_columns
        .iter()
        .map(|column| (column.clone(), facet_options(all_items, exact, column)))
        .collect()
}

fn facet_options(
    all_items: &[Record],
    exact: &BTreeMap<String, Vec<String>>,
    column: &str,
) -> Vec<FacetOption> {
    if all_items.is_empty() {
        return Vec::new();
    }

    // Domain from the unfiltered collection: a value never disappears from
    // the option list just because it currently has zero matches.
    let domain: BTreeSet<String> = all_items
        .iter()
        .map(|record| scalar_key(record.get(column)))
        .collect();

    let base = apply_exact(all_items, exact, Some(column));
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in &base {
        *counts.entry(scalar_key(record.get(column))).or_insert(0) += 1;
    }

    let mut options: Vec<FacetOption> = domain
        .into_iter()
        .map(|key| {
            let count = counts.get(&key).copied().unwrap_or(0);
            FacetOption {
                value: encode_value(&key),
                count,
                is_available: count > 0,
                is_empty: key.is_empty(),
            }
        })
        .collect();

    // Available first, then higher count, then the empty option, then
    // collation-alphabetical ascending.
    options.sort_by(|a, b| {
        b.is_available
            .cmp(&a.is_available)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| b.is_empty.cmp(&a.is_empty))
            .then_with(|| collation_key(&a.value).cmp(&collation_key(&b.value)))
            .then_with(|| a.value.cmp(&b.value))
    });
    options
}
