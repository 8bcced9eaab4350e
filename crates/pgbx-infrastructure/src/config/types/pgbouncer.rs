//! PgBouncer connection configuration types

use std::time::Duration;

use crate::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_CONNECTION_STRING};
use pgbx_domain::constants::DEFAULT_METRIC_PREFIX;
use serde::{Deserialize, Serialize};

/// PgBouncer admin console configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PgBouncerConfig {
    /// libpq-style connection URL of the admin console
    pub connection_string: String,

    /// Prefix of every exported metric name
    pub metric_prefix: String,

    /// Bound on connection establishment and pool checkout (seconds)
    pub connect_timeout_secs: u64,
}

impl PgBouncerConfig {
    /// Connect timeout as a duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for PgBouncerConfig {
    fn default() -> Self {
        Self {
            connection_string: DEFAULT_CONNECTION_STRING.to_string(),
            metric_prefix: DEFAULT_METRIC_PREFIX.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}
