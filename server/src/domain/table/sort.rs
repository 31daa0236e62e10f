//! Stable single-field sorting

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::Record;
use super::value::collation_key;

/// Sort direction, `asc` unless the query says exactly `desc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_param(s: &str) -> Self {
        if s == "desc" { Self::Desc } else { Self::Asc }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Stable in-place sort by one field.
///
/// Descending order reverses only non-equal outcomes, so ties keep their
/// input order under both directions. An unknown field compares everything
/// equal and leaves the input order untouched.
pub fn sort_records(items: &mut [Record], field: &str, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ord = compare_fields(a.get(field), b.get(field));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Three-way comparison with a loose fallback: string pairs compare by
/// collation key (raw string as secondary key), numbers numerically, booleans
/// as false before true. Every mixed or absent pairing is equal rather than a
/// type error.
fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => {
            collation_key(x).cmp(&collation_key(y)).then_with(|| x.cmp(y))
        }
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or(f64::NAN)
            .total_cmp(&y.as_f64().unwrap_or(f64::NAN)),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
