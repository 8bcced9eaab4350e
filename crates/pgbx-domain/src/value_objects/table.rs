//! Status query results
//!
//! A [`StatusTable`] is what the proxied service returns for one `SHOW`
//! command. Converters never see the whole table; they get one
//! [`TabularResult`] per row, which borrows the shared column index.

use std::collections::HashMap;

use super::CellValue;

/// Ordered column names plus a name -> position lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSet {
    /// Build a column set from ordered names
    ///
    /// If a name repeats, lookups by name resolve to its first position.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(position);
        }
        Self { names, index }
    }

    /// Column names in result order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of a column by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether the result has no columns
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Full result of one status command
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusTable {
    columns: ColumnSet,
    rows: Vec<Vec<CellValue>>,
}

impl StatusTable {
    /// Create a table from its columns and row values
    pub fn new(columns: ColumnSet, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Column set shared by every row
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Iterate rows as single-row views
    pub fn rows(&self) -> impl Iterator<Item = TabularResult<'_>> {
        self.rows
            .iter()
            .map(|values| TabularResult::new(&self.columns, values))
    }
}

/// Value Object: one scanned row of a status result
///
/// Immutable and borrowed; a converter call owns nothing beyond the call.
#[derive(Debug, Clone, Copy)]
pub struct TabularResult<'a> {
    columns: &'a ColumnSet,
    values: &'a [CellValue],
}

impl<'a> TabularResult<'a> {
    /// Create a row view
    pub fn new(columns: &'a ColumnSet, values: &'a [CellValue]) -> Self {
        Self { columns, values }
    }

    /// Column names in result order
    pub fn column_names(&self) -> &'a [String] {
        self.columns.names()
    }

    /// Raw cell values in result order
    pub fn values(&self) -> &'a [CellValue] {
        self.values
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell at a position
    pub fn value(&self, position: usize) -> Option<&'a CellValue> {
        self.values.get(position)
    }

    /// Cell by column name
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.columns
            .index_of(column)
            .and_then(|position| self.values.get(position))
    }

    /// `(column name, cell)` pairs in result order
    pub fn iter(self) -> impl Iterator<Item = (&'a str, &'a CellValue)> + 'a {
        self.columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}
