//! Canonical scalar value handling
//!
//! Exact matching, facet domains, and the loose-equality fallback of search
//! filters all compare values through one canonical string key, so the three
//! stay mutually consistent: absent fields, `null`, and `""` collapse into a
//! single empty key, numbers match their decimal rendering, booleans match
//! `"true"`/`"false"`.

use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

/// Reserved wire token standing in for the empty-string value in filter
/// parameters and facet option values.
pub const EMPTY_VALUE_TOKEN: &str = "__empty__";

/// Canonical string key for a record field.
pub fn scalar_key(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        // Records are expected to hold scalars; nested values still get a
        // deterministic key instead of an error.
        Some(other) => other.to_string(),
    }
}

/// Encode a canonical key for wire transport (empty string becomes the token).
pub fn encode_value(key: &str) -> String {
    if key.is_empty() {
        EMPTY_VALUE_TOKEN.to_string()
    } else {
        key.to_string()
    }
}

/// Decode a wire filter value (the token becomes the empty string).
pub fn decode_value(raw: &str) -> String {
    if raw == EMPTY_VALUE_TOKEN {
        String::new()
    } else {
        raw.to_string()
    }
}

/// Collation key for locale-aware string comparisons: NFD decomposition plus
/// lowercasing, with the raw string kept as a secondary key by callers.
pub fn collation_key(s: &str) -> String {
    s.nfd().collect::<String>().to_lowercase()
}
