//! # Domain Layer
//!
//! Types shared by every layer of the PgBouncer exporter.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Cell values, row views, compiled metric maps, scrape results |
//! | [`schema`] | The hand-curated admin console column vocabulary |
//! | [`ports`] | Contracts implemented by the infrastructure layer |
//! | [`error`] | Error taxonomy shared by all crates |
//! | [`constants`] | Metric names and unit conversions |

pub mod constants;
pub mod error;
pub mod ports;
pub mod schema;
pub mod value_objects;

pub use error::{Error, Result};
