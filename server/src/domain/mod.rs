//! Domain logic
//!
//! - `table` - faceted filter/sort/paginate/facet-count engine

pub mod table;

pub use table::{FacetOption, FilterSet, ListQuery, Record, SortDirection};
