//! Value coercion
//!
//! Every metric sink downstream only takes `f64`. NaN is the "no
//! information" value, which leaves two cases that produce the same bits:
//! a NULL cell (fine, exported as NaN) and a cell that should have been a
//! number but was not (reported). The `Option` carries that distinction.

use pgbx_domain::value_objects::CellValue;

/// Convert a cell to a float
///
/// Returns `Some(NaN)` for NULL and `None` when the cell cannot be read as
/// a number.
pub fn to_float(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Integer(value) => Some(*value as f64),
        CellValue::Float(value) => Some(*value),
        CellValue::Timestamp(value) => Some(value.timestamp() as f64),
        CellValue::Text(text) => parse_decimal(text),
        CellValue::Bytes(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_decimal),
        CellValue::Null => Some(f64::NAN),
        CellValue::Boolean(_) => None,
    }
}

/// Decimal text to float; out-of-range text is rejected, not saturated
fn parse_decimal(text: &str) -> Option<f64> {
    let value = text.parse::<f64>().ok()?;
    if value.is_infinite() && !spells_infinity(text) {
        return None;
    }
    Some(value)
}

fn spells_infinity(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
