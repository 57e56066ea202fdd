//! Fetched records and their tabular projection.

use serde_json::Value;

/// One fetched record: field name → JSON value, in response order.
pub type Record = serde_json::Map<String, Value>;

/// Rectangular value grid tabulated from a record sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names, in first-seen field order across all records.
    pub columns: Vec<String>,
    /// One row per record; every row has `columns.len()` cells.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Projects a record sequence onto a rectangular grid.
///
/// Column order is the first-seen field order across the whole sequence.
/// A record missing a field gets `Value::Null` in that cell, so the
/// output is rectangular by construction.
pub fn tabulate(records: &[Record]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for field in record.keys() {
            if !columns.iter().any(|c| c == field) {
                columns.push(field.clone());
            }
        }
    }

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Table { columns, rows }
}
