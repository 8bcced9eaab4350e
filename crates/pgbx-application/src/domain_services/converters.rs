//! Row converters
//!
//! Two strategies walk one scanned row against a compiled namespace map.
//! Both are pure: they return the observations and errors they produced and
//! never touch shared state.
//!
//! | Strategy | Row shape | Fatal when |
//! |----------|-----------|------------|
//! | [`convert_row`] | one entity per row, label columns identify it | never |
//! | [`convert_key_value`] | `(key, value, ...)` | fewer than two columns, or a non-text key |

use std::sync::Arc;

use pgbx_domain::error::{Error, Result};
use pgbx_domain::value_objects::{
    CellValue, CompiledMetric, ConversionStrategy, NamespaceMap, Observation, TabularResult,
};
use tracing::debug;

use super::coercion::to_float;

/// Output of converting one row
#[derive(Debug, Default)]
pub struct RowConversion {
    /// Emitted samples
    pub observations: Vec<Observation>,
    /// Value coercion failures; each skipped exactly one column
    pub errors: Vec<Error>,
}

impl RowConversion {
    fn emit(&mut self, metric: &Arc<CompiledMetric>, value: f64, label_values: Vec<String>) {
        self.observations.push(Observation {
            metric: Arc::clone(metric),
            value: value * metric.scale_factor,
            label_values,
        });
    }
}

/// Convert a row with the strategy the namespace was compiled for
///
/// An `Err` means the rest of the namespace's rows must not be processed.
pub fn convert(map: &NamespaceMap, row: TabularResult<'_>) -> Result<RowConversion> {
    match map.strategy() {
        ConversionStrategy::Row => Ok(convert_row(map, row)),
        ConversionStrategy::KeyValue => convert_key_value(map, row),
    }
}

/// Convert a multi-row namespace row
///
/// Columns the map does not know are skipped silently, so new admin console
/// columns never break a scrape.
pub fn convert_row(map: &NamespaceMap, row: TabularResult<'_>) -> RowConversion {
    let label_values: Vec<String> = map
        .label_column_names()
        .iter()
        .map(|name| label_value(row.get(name)))
        .collect();

    let mut conversion = RowConversion::default();
    for (column, cell) in row.iter() {
        let Some(metric) = map.metric(column) else {
            debug!(namespace = map.namespace(), column, "ignoring column");
            continue;
        };
        match to_float(cell) {
            Some(value) => {
                debug!(namespace = map.namespace(), column, value, "parsed column");
                conversion.emit(metric, value, label_values.clone());
            }
            None => conversion
                .errors
                .push(Error::value_coercion(map.namespace(), column, cell)),
        }
    }
    conversion
}

/// Convert a `(key, value, ...)` row
///
/// Unknown keys are skipped silently. A row that is too short or whose key
/// is not text fails the whole namespace.
pub fn convert_key_value(map: &NamespaceMap, row: TabularResult<'_>) -> Result<RowConversion> {
    let (key, value) = match row.values() {
        [CellValue::Text(key), value, ..] => (key.as_str(), value),
        [key, _, ..] => {
            return Err(Error::row_shape(
                map.namespace(),
                format!("key column is {}, not text", key.kind()),
            ));
        }
        short => {
            return Err(Error::row_shape(
                map.namespace(),
                format!("expected at least 2 columns, got {}", short.len()),
            ));
        }
    };

    let mut conversion = RowConversion::default();
    let Some(metric) = map.metric(key) else {
        debug!(namespace = map.namespace(), key, "ignoring key");
        return Ok(conversion);
    };
    match to_float(value) {
        Some(parsed) => {
            debug!(namespace = map.namespace(), key, value = parsed, "parsed key");
            conversion.emit(metric, parsed, Vec::new());
        }
        None => conversion
            .errors
            .push(Error::value_coercion(map.namespace(), key, value)),
    }
    Ok(conversion)
}

/// Label text for a cell; anything without a natural text form is empty
fn label_value(cell: Option<&CellValue>) -> String {
    match cell {
        Some(CellValue::Text(text)) => text.clone(),
        Some(CellValue::Integer(value)) => value.to_string(),
        Some(CellValue::Float(value)) => value.to_string(),
        Some(
            CellValue::Null
            | CellValue::Timestamp(_)
            | CellValue::Bytes(_)
            | CellValue::Boolean(_),
        )
        | None => String::new(),
    }
}
