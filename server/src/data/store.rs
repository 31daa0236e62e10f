//! Table dataset stores
//!
//! A store exposes one read operation returning the whole collection; the
//! engine never writes back. The JSON file store re-reads its file on every
//! call so edits to the dataset show up without a restart.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use super::error::DataError;
use crate::domain::table::Record;

/// Read access to one table's record collection
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Load the entire current collection in file order
    async fn load(&self) -> Result<Vec<Record>, DataError>;
}

/// JSON file backed store
///
/// Accepts either a bare array of objects or an object with an `items` array.
/// A missing file is an empty collection.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<Vec<Record>, DataError> {
        let path = self.path.display().to_string();
        let value: Value =
            serde_json::from_str(content).map_err(|e| DataError::parse(&path, e))?;

        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("items") {
                Some(Value::Array(entries)) => entries,
                _ => return Err(DataError::unsupported_shape(&path)),
            },
            _ => return Err(DataError::unsupported_shape(&path)),
        };

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                Value::Object(record) => records.push(record),
                other => {
                    tracing::warn!(path = %path, entry = %other, "Skipping non-object dataset entry");
                }
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl TableStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Record>, DataError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Dataset file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(DataError::Io(e)),
        };
        self.parse(&content)
    }
}
