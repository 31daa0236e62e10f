//! Unified error type for the data layer

use thiserror::Error;

/// Errors raised while loading table datasets
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file could not be parsed as JSON
    #[error("Failed to parse dataset {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    /// Dataset file has a shape the store does not understand
    #[error(
        "Unsupported dataset shape in {path}: expected an array or an object with an \"items\" array"
    )]
    UnsupportedShape { path: String },

    /// Requested table is not registered
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}

impl DataError {
    /// Create a parse error with the file path preserved
    pub fn parse(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Create an unsupported shape error
    pub fn unsupported_shape(path: impl Into<String>) -> Self {
        Self::UnsupportedShape { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_table_display() {
        let err = DataError::UnknownTable("features".to_string());
        assert_eq!(err.to_string(), "Unknown table: features");
    }

    #[test]
    fn test_parse_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DataError::parse("/data/tables/features.json", source);
        assert!(
            err.to_string()
                .starts_with("Failed to parse dataset /data/tables/features.json")
        );
    }

    #[test]
    fn test_unsupported_shape_display() {
        let err = DataError::unsupported_shape("x.json");
        assert!(err.to_string().contains("x.json"));
        assert!(err.to_string().contains("\"items\""));
    }
}
