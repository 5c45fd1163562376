// src/tables/model.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A column header as it came out of the document analysis.
/// Analysis tools emit positional integers for tables whose first row
/// was not recognised as a header, so labels are not always text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnLabel {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ColumnLabel {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnLabel::Int(_) | ColumnLabel::Float(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnLabel::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnLabel::Int(i) => write!(f, "{}", i),
            ColumnLabel::Float(x) => write!(f, "{}", x),
            ColumnLabel::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ColumnLabel {
    fn from(s: &str) -> Self {
        ColumnLabel::Text(s.to_string())
    }
}

/// A single cell value.
/// Variant order matters for untagged deserialization: `null` first,
/// then numbers, then ISO dates, and any remaining string is text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Number(x)
    }
}

/// An extracted (or consolidated) table. Rows are positional and every row
/// has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawTable")]
pub struct Table {
    pub columns: Vec<ColumnLabel>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Table as it appears in analysis JSON, before row widths are checked.
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<ColumnLabel>,
    #[serde(default)]
    rows: Vec<Vec<CellValue>>,
}

impl From<RawTable> for Table {
    fn from(raw: RawTable) -> Self {
        Table::new(raw.columns, raw.rows)
    }
}

impl Table {
    /// Builds a table, padding short rows with `Empty` and truncating long ones
    /// so the column-count invariant holds.
    pub fn new(columns: Vec<ColumnLabel>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Mutable access to every cell, row-major.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut CellValue> {
        self.rows.iter_mut().flat_map(|row| row.iter_mut())
    }

    pub fn cells(&self) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().flat_map(|row| row.iter())
    }
}
