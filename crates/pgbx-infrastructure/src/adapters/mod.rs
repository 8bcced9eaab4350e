//! Adapters for external systems

pub mod pgbouncer;

pub use pgbouncer::PgBouncerSource;
