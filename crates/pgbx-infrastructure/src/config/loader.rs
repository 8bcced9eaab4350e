//! Configuration loader
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. Default values from `AppConfig::default()`
//! 2. TOML configuration file (explicit path, or the first default location found)
//! 3. Environment variables with prefix, `__` between nested keys
//!    (e.g. `PGBX_PGBOUNCER__METRIC_PREFIX`)
//! 4. `DATA_SOURCE_NAME`, which replaces the connection string
//! 5. Explicit overrides, usually command-line flags

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DATA_SOURCE_NAME_ENV, DEFAULT_CONFIG_DIR,
    DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use pgbx_domain::error::{Error, Result};
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Dotted key / value pairs applied last
    overrides: Vec<(String, String)>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            overrides: Vec::new(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override one value by dotted key, e.g. `server.listen_address`
    pub fn with_override<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path);
            } else {
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path);
        }

        figment = figment
            .merge(Env::prefixed(&format!("{CONFIG_ENV_PREFIX}_")).split(CONFIG_ENV_SEPARATOR))
            .merge(
                Env::raw()
                    .only(&[DATA_SOURCE_NAME_ENV])
                    .map(|_| "pgbouncer.connection_string".into()),
            );

        for (key, value) in &self.overrides {
            figment = figment.merge(Serialized::default(key, value));
        }

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// First existing file among the default locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(config)?;
    validate_pgbouncer_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    let server = &config.server;
    if server.listen_address.parse::<SocketAddr>().is_err() {
        return Err(Error::configuration(format!(
            "Listen address {} is not a valid host:port",
            server.listen_address
        )));
    }
    if !server.metrics_path.starts_with('/') || server.metrics_path == "/" {
        return Err(Error::configuration(format!(
            "Metrics path {} must start with / and cannot be the root",
            server.metrics_path
        )));
    }
    Ok(())
}

fn validate_pgbouncer_config(config: &AppConfig) -> Result<()> {
    let pgbouncer = &config.pgbouncer;
    if pgbouncer.connection_string.trim().is_empty() {
        return Err(Error::configuration("Connection string cannot be empty"));
    }
    if !is_valid_metric_prefix(&pgbouncer.metric_prefix) {
        return Err(Error::configuration(format!(
            "Metric prefix {:?} is not a valid metric name",
            pgbouncer.metric_prefix
        )));
    }
    if pgbouncer.connect_timeout_secs == 0 {
        return Err(Error::configuration("Connect timeout cannot be 0"));
    }
    Ok(())
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
fn is_valid_metric_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
