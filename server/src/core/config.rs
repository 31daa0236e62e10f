use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SORT_COLUMN,
};

/// Check if a host string binds to all interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Per-table configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TableFileConfig {
    /// Dataset file path; defaults to `<data-dir>/tables/<name>.json`
    pub file: Option<String>,
    /// Columns with exact-match (dropdown) filter semantics
    pub exact_columns: Option<Vec<String>>,
    /// Default sort column
    pub default_sort: Option<String>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub tables: Option<BTreeMap<String, TableFileConfig>>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        // Server
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        // Tables: merged per table name, later sections override per field
        if let Some(tables) = other.tables {
            let current = self.tables.get_or_insert_with(BTreeMap::new);
            for (name, table) in tables {
                let entry = current.entry(name.clone()).or_default();
                if table.file.is_some() {
                    tracing::trace!(table = %name, file = ?table.file, "Merging tables.file");
                    entry.file = table.file;
                }
                if table.exact_columns.is_some() {
                    tracing::trace!(table = %name, "Merging tables.exact_columns");
                    entry.exact_columns = table.exact_columns;
                }
                if table.default_sort.is_some() {
                    tracing::trace!(table = %name, sort = ?table.default_sort, "Merging tables.default_sort");
                    entry.default_sort = table.default_sort;
                }
            }
        }

        // Debug
        if other.debug.is_some() {
            tracing::trace!(debug = ?other.debug, "Merging debug");
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Per-table runtime settings
#[derive(Debug, Clone)]
pub struct TableSettings {
    pub file: Option<String>,
    pub exact_columns: Vec<String>,
    pub default_sort: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            file: None,
            exact_columns: Vec::new(),
            default_sort: DEFAULT_SORT_COLUMN.to_string(),
        }
    }
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub tables: BTreeMap<String, TableSettings>,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.facetgrid/facetgrid.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir (~/.facetgrid/facetgrid.json) - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        Ok(Self::from_sources(file_config, cli))
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn from_sources(file_config: FileConfig, cli: &CliConfig) -> Self {
        let file_server = file_config.server.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let tables = file_config
            .tables
            .unwrap_or_default()
            .into_iter()
            .map(|(name, table)| {
                let settings = TableSettings {
                    file: table.file,
                    exact_columns: table.exact_columns.unwrap_or_default(),
                    default_sort: table
                        .default_sort
                        .unwrap_or_else(|| DEFAULT_SORT_COLUMN.to_string()),
                };
                (name, settings)
            })
            .collect();

        let debug = cli.debug || file_config.debug.unwrap_or(false);

        Self {
            server: ServerConfig { host, port },
            tables,
            debug,
        }
    }
}

/// Path to the profile config file (~/.facetgrid/facetgrid.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(!is_all_interfaces("127.0.0.1"));
        assert!(!is_all_interfaces("localhost"));
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = AppConfig::from_sources(FileConfig::default(), &CliConfig::default());
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.tables.is_empty());
        assert!(!config.debug);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file: FileConfig = serde_json::from_str(
            r#"{"server": {"host": "0.0.0.0", "port": 9000}}"#,
        )
        .unwrap();
        let cli = CliConfig {
            port: Some(5171),
            ..CliConfig::default()
        };
        let config = AppConfig::from_sources(file, &cli);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5171);
    }

    #[test]
    fn test_table_section_parsing() {
        let file: FileConfig = serde_json::from_str(
            r#"{
                "tables": {
                    "features": {"exact_columns": ["status", "category"]},
                    "payments": {"default_sort": "date"}
                }
            }"#,
        )
        .unwrap();
        let config = AppConfig::from_sources(file, &CliConfig::default());
        assert_eq!(
            config.tables["features"].exact_columns,
            vec!["status".to_string(), "category".to_string()]
        );
        assert_eq!(config.tables["features"].default_sort, DEFAULT_SORT_COLUMN);
        assert_eq!(config.tables["payments"].default_sort, "date");
        assert!(config.tables["payments"].exact_columns.is_empty());
    }

    #[test]
    fn test_merge_overlay_wins_per_field() {
        let mut base: FileConfig = serde_json::from_str(
            r#"{
                "server": {"host": "127.0.0.1", "port": 5170},
                "tables": {"features": {"exact_columns": ["status"], "default_sort": "id"}}
            }"#,
        )
        .unwrap();
        let overlay: FileConfig = serde_json::from_str(
            r#"{
                "server": {"port": 8080},
                "tables": {"features": {"default_sort": "name"}}
            }"#,
        )
        .unwrap();
        base.merge(overlay);
        let config = AppConfig::from_sources(base, &CliConfig::default());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.tables["features"].exact_columns,
            vec!["status".to_string()]
        );
        assert_eq!(config.tables["features"].default_sort, "name");
    }

    #[test]
    fn test_load_from_file_with_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"debug": true}"#).unwrap();
        let file = FileConfig::load_from_file(&path).unwrap();
        assert_eq!(file.debug, Some(true));
    }
}
