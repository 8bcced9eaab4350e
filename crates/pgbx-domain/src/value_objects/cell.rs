//! Tabular cell values
//!
//! The admin console hands back heterogeneous cells. They are modelled as a
//! closed sum type so that every consumer has to match exhaustively.

use chrono::{DateTime, Utc};

/// Value Object: one cell of a status query result
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Signed integer cell
    Integer(i64),
    /// Floating-point cell
    Float(f64),
    /// Timestamp cell
    Timestamp(DateTime<Utc>),
    /// Textual cell
    Text(String),
    /// Raw byte cell, usually undecoded text
    Bytes(Vec<u8>),
    /// Boolean cell; has no numeric meaning
    Boolean(bool),
    /// Absent / SQL NULL
    Null,
}

impl CellValue {
    /// Short name of the representation, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Timestamp(_) => "timestamp",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Self::from)
    }
}
