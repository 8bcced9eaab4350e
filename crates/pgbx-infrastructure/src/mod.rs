//! # Infrastructure Layer
//!
//! Everything that touches the outside world: configuration files and
//! environment, the log subscriber, the PgBouncer admin console and the
//! Prometheus registry.
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered configuration with validation |
//! | [`logging`] | Structured logging with tracing |
//! | [`constants`] | Defaults and well-known names |
//!
//! ### Adapters
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | `StatusSource` over the admin console (r2d2 + postgres) |
//! | [`exporter`] | Prometheus collector and registry wiring |

pub mod adapters;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod exporter;
pub mod logging;

pub use error_ext::ErrorContext;
