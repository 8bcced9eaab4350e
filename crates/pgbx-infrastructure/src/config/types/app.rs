//! Application configuration root

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, PgBouncerConfig, ServerConfig};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP endpoint
    pub server: ServerConfig,

    /// Admin console connection and metric naming
    pub pgbouncer: PgBouncerConfig,

    /// Logging
    pub logging: LoggingConfig,
}
