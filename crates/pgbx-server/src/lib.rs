//! # PgBouncer Exporter Server
//!
//! HTTP transport for the PgBouncer exporter.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /` | Landing page linking to the metrics path |
//! | `GET <metrics_path>` | Prometheus text exposition; every request runs one poll |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pgbx_infrastructure::config::ConfigLoader;
//! use pgbx_server::run;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     run(ConfigLoader::new()).await
//! }
//! ```

pub mod handlers;
pub mod init;
pub mod routes;

pub use init::run;
pub use routes::{ExporterState, exporter_rocket};
