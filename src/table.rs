//! Tabular output: cells, rows, and the positional row assembler.

use crate::error::{ExtractError, ExtractResult};
use crate::schema::Column;
use serde::Serialize;
use serde_json::Value;

/// One scalar or nested value in the table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    /// Nested structure kept as-is (hashtags, mentions, place).
    Json(Value),
}

impl Cell {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(n) => Some(*n),
            _ => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Text form used by delimited sinks. Nested values become compact JSON,
    /// `Null` becomes an empty field.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Str(s) => s.clone(),
            Cell::Int(n) => n.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Null => String::new(),
            Cell::Json(v) => v.to_string(),
        }
    }
}

impl From<Option<Value>> for Cell {
    fn from(v: Option<Value>) -> Self {
        match v {
            None | Some(Value::Null) => Cell::Null,
            Some(v) => Cell::Json(v),
        }
    }
}

/// One output record, positionally aligned with the table header.
#[derive(Clone, Debug, PartialEq)]
pub struct Row(pub Vec<Cell>);

impl Row {
    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

/// Immutable table of rows bound to a fixed column order.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name()).collect()
    }
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Cell at `row` for the column called `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Cell> {
        let col = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.0.get(col))
    }

    /// All values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r.0[col]).collect())
    }
}

/// Collects one value sequence per column and zips them into rows.
///
/// Every pushed column must hold exactly `expected` values; a short or long
/// column is a `LengthMismatch` and is never truncated or padded.
pub struct RowAssembler {
    expected: usize,
    columns: Vec<Column>,
    values: Vec<Vec<Cell>>,
}

impl RowAssembler {
    pub fn new(expected: usize) -> Self {
        Self { expected, columns: Vec::new(), values: Vec::new() }
    }

    pub fn push(&mut self, column: Column, values: Vec<Cell>) -> ExtractResult<()> {
        if values.len() != self.expected {
            return Err(ExtractError::LengthMismatch {
                column: column.name(),
                expected: self.expected,
                actual: values.len(),
            });
        }
        self.columns.push(column);
        self.values.push(values);
        Ok(())
    }

    pub fn finish(self) -> Table {
        let mut iters: Vec<_> = self.values.into_iter().map(|v| v.into_iter()).collect();
        let rows = (0..self.expected)
            .map(|_| {
                // lengths were checked in push()
                Row(iters.iter_mut().map(|it| it.next().unwrap_or(Cell::Null)).collect())
            })
            .collect();
        Table { columns: self.columns, rows }
    }
}
