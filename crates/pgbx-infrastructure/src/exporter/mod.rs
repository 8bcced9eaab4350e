//! Prometheus export adapter

pub mod collector;

pub use collector::{PgBouncerCollector, build_registry};
