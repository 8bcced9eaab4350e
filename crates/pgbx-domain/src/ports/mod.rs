//! Domain Port Interfaces
//!
//! Contracts the infrastructure layer implements for the scrape engine.

/// Query access to the proxied service's admin console
pub mod status_source;

pub use status_source::{SharedStatusSource, StatusSource, status_command};
