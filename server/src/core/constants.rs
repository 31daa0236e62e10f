// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "FacetGrid";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "facetgrid";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".facetgrid";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "facetgrid.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "FACETGRID_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "FACETGRID_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "FACETGRID_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "FACETGRID_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "FACETGRID_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5170;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "FACETGRID_DATA_DIR";

// =============================================================================
// Request Body Limits
// =============================================================================

/// Default body limit for API requests (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

// =============================================================================
// Tables
// =============================================================================

/// Default sort column when a table does not configure one
pub const DEFAULT_SORT_COLUMN: &str = "id";

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
