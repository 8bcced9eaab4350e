//! Configuration management
//!
//! Defaults, an optional TOML file, `PGBX_` environment variables, the
//! legacy `DATA_SOURCE_NAME` variable and command-line flags, merged in that
//! order by [`loader::ConfigLoader`].

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, PgBouncerConfig, ServerConfig};
