//! Query string parsing
//!
//! Splits the raw query parameters into pagination, sorting, and the two
//! filter maps. Parsing never fails: malformed numbers fall back to defaults
//! and empty filter values are dropped.

use std::collections::BTreeMap;

use super::filter::FilterSet;
use super::sort::SortDirection;
use super::value::decode_value;

/// Parameter names consumed by pagination and sorting, excluded from the
/// filter maps.
pub const RESERVED_PARAMS: &[&str] = &["page", "size", "sort", "order"];

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Fully parsed list query.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub page: usize,
    pub size: usize,
    pub sort: String,
    pub order: SortDirection,
    pub filters: FilterSet,
    /// Filter parameters as given on the wire, echoed back in the response.
    pub raw_filters: BTreeMap<String, String>,
}

/// Parse ordered query pairs. The first occurrence of a key wins, matching
/// URL query semantics. `exact_columns` decides which parameters become
/// multi-value exact filters; everything else non-reserved becomes a
/// substring filter.
pub fn parse_query(
    params: &[(String, String)],
    exact_columns: &[String],
    default_sort: &str,
) -> ListQuery {
    let mut first: BTreeMap<&str, &str> = BTreeMap::new();
    for (key, value) in params {
        first.entry(key.as_str()).or_insert(value.as_str());
    }

    let page = parse_positive(first.get("page").copied()).unwrap_or(DEFAULT_PAGE);
    let size = parse_positive(first.get("size").copied()).unwrap_or(DEFAULT_PAGE_SIZE);
    let sort = first
        .get("sort")
        .copied()
        .filter(|s| !s.is_empty())
        .unwrap_or(default_sort)
        .to_string();
    let order = SortDirection::from_param(first.get("order").copied().unwrap_or(""));

    let mut filters = FilterSet::default();
    let mut raw_filters = BTreeMap::new();
    for (key, value) in &first {
        if RESERVED_PARAMS.contains(key) || value.is_empty() {
            continue;
        }
        raw_filters.insert(key.to_string(), value.to_string());
        if exact_columns.iter().any(|c| c == key) {
            let values: Vec<String> = value.split(',').map(decode_value).collect();
            if !values.is_empty() {
                filters.exact.insert(key.to_string(), values);
            }
        } else {
            filters.search.insert(key.to_string(), value.to_string());
        }
    }

    ListQuery {
        page,
        size,
        sort,
        order,
        filters,
        raw_filters,
    }
}

fn parse_positive(s: Option<&str>) -> Option<usize> {
    s.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::value::EMPTY_VALUE_TOKEN;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn exact_columns() -> Vec<String> {
        vec!["status".to_string(), "category".to_string()]
    }

    #[test]
    fn test_defaults() {
        let q = parse_query(&[], &exact_columns(), "id");
        assert_eq!(q.page, 1);
        assert_eq!(q.size, 10);
        assert_eq!(q.sort, "id");
        assert_eq!(q.order, SortDirection::Asc);
        assert!(q.filters.is_empty());
        assert!(q.raw_filters.is_empty());
    }

    #[test]
    fn test_non_numeric_page_size_degrade() {
        let q = parse_query(
            &pairs(&[("page", "abc"), ("size", "-3")]),
            &exact_columns(),
            "id",
        );
        assert_eq!(q.page, 1);
        assert_eq!(q.size, 10);

        let q = parse_query(&pairs(&[("page", "0"), ("size", "0")]), &[], "id");
        assert_eq!(q.page, 1);
        assert_eq!(q.size, 10);
    }

    #[test]
    fn test_pagination_and_sort_params() {
        let q = parse_query(
            &pairs(&[("page", "3"), ("size", "25"), ("sort", "name"), ("order", "desc")]),
            &exact_columns(),
            "id",
        );
        assert_eq!(q.page, 3);
        assert_eq!(q.size, 25);
        assert_eq!(q.sort, "name");
        assert_eq!(q.order, SortDirection::Desc);
    }

    #[test]
    fn test_exact_column_comma_split() {
        let q = parse_query(&pairs(&[("status", "Active,Open")]), &exact_columns(), "id");
        assert_eq!(
            q.filters.exact["status"],
            vec!["Active".to_string(), "Open".to_string()]
        );
        assert!(q.filters.search.is_empty());
        assert_eq!(q.raw_filters["status"], "Active,Open");
    }

    #[test]
    fn test_sentinel_decodes_to_empty_string() {
        let raw = format!("Active,{}", EMPTY_VALUE_TOKEN);
        let q = parse_query(
            &pairs(&[("status", raw.as_str())]),
            &exact_columns(),
            "id",
        );
        assert_eq!(
            q.filters.exact["status"],
            vec!["Active".to_string(), String::new()]
        );
    }

    #[test]
    fn test_non_exact_param_is_search_filter() {
        let q = parse_query(&pairs(&[("name", "Item")]), &exact_columns(), "id");
        assert!(q.filters.exact.is_empty());
        assert_eq!(q.filters.search["name"], "Item");
    }

    #[test]
    fn test_empty_values_dropped() {
        let q = parse_query(
            &pairs(&[("status", ""), ("name", "")]),
            &exact_columns(),
            "id",
        );
        assert!(q.filters.is_empty());
        assert!(q.raw_filters.is_empty());
    }

    #[test]
    fn test_reserved_params_never_filter() {
        let q = parse_query(
            &pairs(&[("page", "2"), ("order", "desc"), ("name", "x")]),
            &exact_columns(),
            "id",
        );
        assert!(!q.raw_filters.contains_key("page"));
        assert!(!q.raw_filters.contains_key("order"));
        assert_eq!(q.raw_filters.len(), 1);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let q = parse_query(
            &pairs(&[("page", "2"), ("page", "7"), ("name", "a"), ("name", "b")]),
            &exact_columns(),
            "id",
        );
        assert_eq!(q.page, 2);
        assert_eq!(q.filters.search["name"], "a");
    }

    #[test]
    fn test_empty_sort_falls_back_to_default() {
        let q = parse_query(&pairs(&[("sort", "")]), &exact_columns(), "id");
        assert_eq!(q.sort, "id");
    }
}
