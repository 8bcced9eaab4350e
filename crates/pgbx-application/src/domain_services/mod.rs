//! Domain services
//!
//! Stateless building blocks of the scrape path.

pub mod coercion;
pub mod converters;
pub mod metric_map;

pub use coercion::to_float;
pub use converters::{RowConversion, convert, convert_key_value, convert_row};
pub use metric_map::build_metric_maps;
