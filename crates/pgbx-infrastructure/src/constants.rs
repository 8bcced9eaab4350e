//! Infrastructure layer constants
//!
//! Metric names and unit conversions live in `pgbx_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "pgbouncer-exporter.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "pgbouncer-exporter";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "PGBX";

/// Separator for nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Legacy environment variable carrying the connection string
pub const DATA_SOURCE_NAME_ENV: &str = "DATA_SOURCE_NAME";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default listen address
pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:9127";

/// Default metrics path
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

// ============================================================================
// PGBOUNCER CONSTANTS
// ============================================================================

/// Default admin console connection string
pub const DEFAULT_CONNECTION_STRING: &str =
    "postgres://postgres:@localhost:6543/pgbouncer?sslmode=disable";

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Liveness probe command
pub const LIVENESS_COMMAND: &str = "SHOW VERSION;";

/// Admin console pool size; one logical connection
pub const ADMIN_POOL_MAX_SIZE: u32 = 1;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "PGBX_LOG";

/// File stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "pgbouncer-exporter";
