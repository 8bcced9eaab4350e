//! Structured logging with tracing
//!
//! Stdout subscriber, plain or JSON, plus an optional daily-rotated file
//! sink in the same format. `PGBX_LOG` takes precedence over the configured
//! level and accepts full `EnvFilter` directives, e.g.
//! `PGBX_LOG=pgbx_application=debug,info`.

use std::ffi::OsStr;
use std::path::Path;

use pgbx_domain::error::{Error, Result};
use tracing::{Level, info};
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_FILTER_ENV};

/// Install the global subscriber
///
/// Fails if the level is unknown or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
    });
    let file = config.file_output.as_deref().map(file_writer);
    let registry = Registry::default().with(filter);

    let installed = if config.json_format {
        registry
            .with(fmt::layer().json().with_thread_names(true))
            .with(file.map(|writer| fmt::layer().json().with_writer(writer).with_ansi(false)))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_thread_names(true))
            .with(file.map(|writer| fmt::layer().with_writer(writer).with_ansi(false)))
            .try_init()
    };
    installed.map_err(|e| Error::internal(format!("Failed to install log subscriber: {e}")))?;

    info!(%level, json = config.json_format, "logging initialized");
    Ok(())
}

/// `logs/exporter.log` rolls daily into `logs/exporter.<date>`
fn file_writer(path: &Path) -> RollingFileAppender {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM));
    rolling::daily(directory, stem)
}

/// Parse a level name, case-insensitively; `warning` is accepted for `warn`
pub fn parse_log_level(level: &str) -> Result<Level> {
    let name = level.trim();
    let name = if name.eq_ignore_ascii_case("warning") {
        "warn"
    } else {
        name
    };
    name.parse::<Level>().map_err(|_| {
        Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))
    })
}

/// Report which configuration file was merged
pub fn log_config_loaded(config_path: &Path) {
    info!(path = %config_path.display(), "configuration file loaded");
}
