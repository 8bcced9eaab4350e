//! Configuration types module

pub mod app;
pub mod logging;
pub mod pgbouncer;
pub mod server;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use pgbouncer::PgBouncerConfig;
pub use server::ServerConfig;
