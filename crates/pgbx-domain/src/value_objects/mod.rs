//! Value Objects
//!
//! Immutable data carried between the schema, the converters and the
//! export adapter.

mod cell;
mod metric;
mod scrape;
mod table;

pub use cell::CellValue;
pub use metric::{
    ColumnRole, ColumnSpec, CompiledMetric, ConversionStrategy, MetricDescriptor, NamespaceMap,
    NamespaceSchema, Observation, ValueKind,
};
pub use scrape::{ScrapeHealth, ScrapeOutcome};
pub use table::{ColumnSet, StatusTable, TabularResult};
