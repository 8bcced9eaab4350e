//! Application Layer - PgBouncer exporter
//!
//! Turns admin console status rows into typed metric observations.
//!
//! ## Architecture
//!
//! - [`domain_services`]: pure functions over immutable inputs; value
//!   coercion, the metric map builder and the two row converters
//! - [`use_cases`]: the scrape orchestrator that sequences status queries and
//!   owns the exporter health state
//!
//! ## Dependencies
//!
//! This crate depends only on `pgbx-domain` and `tracing`. Network access
//! goes through the [`StatusSource`](pgbx_domain::ports::StatusSource) port.

pub mod domain_services;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
