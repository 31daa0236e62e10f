//! Faceted table query engine
//!
//! Pure, synchronous transformations over an in-memory snapshot of a table:
//! parse the query string, filter, sort, paginate, and compute facet options
//! with leave-one-out counts. Every step is a total function; malformed input
//! degrades to defaults instead of failing.

pub mod facet;
pub mod filter;
pub mod paginate;
pub mod query;
pub mod sort;
pub mod value;

use std::collections::BTreeMap;

pub use facet::{FacetOption, compute_facets};
pub use filter::{FilterSet, apply_filters};
pub use paginate::{Page, paginate};
pub use query::{ListQuery, parse_query};
pub use sort::{SortDirection, sort_records};

/// A table row: an ordered mapping from column name to a JSON scalar.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Result of running one list query against a table snapshot.
#[derive(Debug)]
pub struct QueryOutput {
    pub items: Vec<Record>,
    pub total: usize,
    pub facets: BTreeMap<String, Vec<FacetOption>>,
}

/// Run the full pipeline: filter, sort, paginate, and compute facets.
///
/// Facets are computed from the unfiltered snapshot so that values never
/// disappear from a column's option list while they are filtered out.
pub fn execute_query(items: Vec<Record>, query: &ListQuery, facet_columns: &[String]) -> QueryOutput {
    let facets = compute_facets(&items, &query.filters.exact, facet_columns);

    let mut filtered = apply_filters(&items, &query.filters);
    sort_records(&mut filtered, &query.sort, query.order);
    let page = paginate(filtered, query.page, query.size);

    QueryOutput {
        items: page.items,
        total: page.total,
        facets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: serde_json::Value) -> Record {
        match v {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn status_dataset() -> Vec<Record> {
        vec![
            record(json!({"id": 1, "status": "Active"})),
            record(json!({"id": 2, "status": "Closed"})),
            record(json!({"id": 3, "status": "Active"})),
        ]
    }

    #[test]
    fn test_execute_query_status_filter() {
        let params = vec![("status".to_string(), "Active".to_string())];
        let exact = vec!["status".to_string()];
        let query = parse_query(&params, &exact, "id");

        let out = execute_query(status_dataset(), &query, &exact);

        assert_eq!(out.total, 2);
        assert_eq!(out.items.len(), 2);
        assert_eq!(out.items[0]["id"], json!(1));
        assert_eq!(out.items[1]["id"], json!(3));

        // Leave-one-out: the status filter does not hide Closed from its own facet
        let status = &out.facets["status"];
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].value, "Active");
        assert_eq!(status[0].count, 2);
        assert!(status[0].is_available);
        assert_eq!(status[1].value, "Closed");
        assert_eq!(status[1].count, 1);
        assert!(status[1].is_available);
    }

    #[test]
    fn test_execute_query_empty_dataset() {
        let query = parse_query(&[], &["status".to_string()], "id");
        let out = execute_query(Vec::new(), &query, &["status".to_string()]);
        assert_eq!(out.total, 0);
        assert!(out.items.is_empty());
        assert!(out.facets["status"].is_empty());
    }

    #[test]
    fn test_execute_query_page_beyond_end() {
        let params = vec![("page".to_string(), "9".to_string())];
        let query = parse_query(&params, &[], "id");
        let out = execute_query(status_dataset(), &query, &[]);
        assert!(out.items.is_empty());
        assert_eq!(out.total, 3);
    }
}
