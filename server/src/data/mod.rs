//! Data layer: table registry and dataset stores

pub mod error;
pub mod store;

use std::collections::BTreeMap;

pub use error::DataError;
pub use store::{JsonFileStore, TableStore};

use crate::core::config::TableSettings;
use crate::core::storage::{AppStorage, DataSubdir};
use crate::domain::table::Record;
use crate::utils::file::expand_path;

/// One registered table: its settings plus its backing store
pub struct TableHandle {
    pub name: String,
    pub settings: TableSettings,
    store: Box<dyn TableStore>,
}

impl std::fmt::Debug for TableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TableHandle {
    /// Load the table's full record collection
    pub async fn load(&self) -> Result<Vec<Record>, DataError> {
        self.store.load().await
    }
}

/// Registry of all tables served by this instance
///
/// Tables come from two sources: entries in the config file and `*.json`
/// files found in the tables data directory. Unconfigured files get default
/// settings, so dropping a JSON file into the data directory is enough to
/// serve it.
pub struct DatasetService {
    tables: BTreeMap<String, TableHandle>,
}

impl DatasetService {
    pub async fn init(
        storage: &AppStorage,
        configs: &BTreeMap<String, TableSettings>,
    ) -> Result<Self, DataError> {
        let tables_dir = storage.subdir(DataSubdir::Tables);
        let mut tables = BTreeMap::new();

        for (name, settings) in configs {
            let path = match &settings.file {
                Some(file) => expand_path(file),
                None => tables_dir.join(format!("{}.json", name)),
            };
            tracing::debug!(table = %name, path = %path.display(), "Registering configured table");
            tables.insert(
                name.clone(),
                TableHandle {
                    name: name.clone(),
                    settings: settings.clone(),
                    store: Box::new(JsonFileStore::new(path)),
                },
            );
        }

        let mut entries = tokio::fs::read_dir(&tables_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if tables.contains_key(name) {
                continue;
            }
            tracing::debug!(table = %name, path = %path.display(), "Registering discovered table");
            tables.insert(
                name.to_string(),
                TableHandle {
                    name: name.to_string(),
                    settings: TableSettings::default(),
                    store: Box::new(JsonFileStore::new(path)),
                },
            );
        }

        tracing::debug!(count = tables.len(), "Dataset service initialized");
        Ok(Self { tables })
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn handles(&self) -> impl Iterator<Item = &TableHandle> {
        self.tables.values()
    }

    pub fn table(&self, name: &str) -> Result<&TableHandle, DataError> {
        self.tables
            .get(name)
            .ok_or_else(|| DataError::UnknownTable(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_storage(dir: &std::path::Path) -> AppStorage {
        std::fs::create_dir_all(dir.join(DataSubdir::Tables.as_str())).unwrap();
        AppStorage::init_for_test(dir.to_path_buf())
    }

    #[tokio::test]
    async fn test_init_discovers_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = make_storage(dir.path());
        std::fs::write(
            storage.subdir(DataSubdir::Tables).join("features.json"),
            r#"[{"id": 1}]"#,
        )
        .unwrap();

        let datasets = DatasetService::init(&storage, &BTreeMap::new()).await.unwrap();
        assert_eq!(datasets.table_names(), vec!["features".to_string()]);

        let table = datasets.table("features").unwrap();
        assert!(table.settings.exact_columns.is_empty());
        assert_eq!(table.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_init_configured_table_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let storage = make_storage(dir.path());

        let mut configs = BTreeMap::new();
        configs.insert(
            "payments".to_string(),
            TableSettings {
                file: None,
                exact_columns: vec!["status".to_string()],
                default_sort: "id".to_string(),
            },
        );

        let datasets = DatasetService::init(&storage, &configs).await.unwrap();
        let table = datasets.table("payments").unwrap();
        assert_eq!(table.name, "payments");
        assert_eq!(table.settings.exact_columns, vec!["status".to_string()]);
        // No file on disk yet: empty collection, not an error
        assert!(table.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_init_explicit_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = make_storage(dir.path());
        let custom = dir.path().join("elsewhere.json");
        std::fs::write(&custom, r#"{"items": [{"id": 1}, {"id": 2}]}"#).unwrap();

        let mut configs = BTreeMap::new();
        configs.insert(
            "features".to_string(),
            TableSettings {
                file: Some(custom.display().to_string()),
                ..TableSettings::default()
            },
        );

        let datasets = DatasetService::init(&storage, &configs).await.unwrap();
        assert_eq!(datasets.table("features").unwrap().load().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_table_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let storage = make_storage(dir.path());
        let datasets = DatasetService::init(&storage, &BTreeMap::new()).await.unwrap();
        let err = datasets.table("nope").unwrap_err();
        assert!(matches!(err, DataError::UnknownTable(ref name) if name == "nope"));
    }
}
