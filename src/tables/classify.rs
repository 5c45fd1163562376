// src/tables/classify.rs
use crate::tables::model::ColumnLabel;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Whole word "date", any case. "Transaction Date" matches, "Update" does not.
static DATE_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bdate\b").expect("Failed to compile DATE_LABEL_RE"));

/// Output name and header visibility for one consolidated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDescriptor {
    pub name: String,
    pub show_header: bool,
}

/// Classifies the table at 1-based position `idx` from its column labels.
///
/// Decision table:
/// - default: `Summary_{idx}`, header shown
/// - every label numeric (and at least one label): header hidden
/// - any text label containing the word "date": `Transaction_{idx}`, header shown
pub fn classify(columns: &[ColumnLabel], idx: usize) -> SheetDescriptor {
    let numeric_only = !columns.is_empty() && columns.iter().all(ColumnLabel::is_numeric);
    let has_date_column = columns
        .iter()
        .filter_map(ColumnLabel::as_text)
        .any(|label| DATE_LABEL_RE.is_match(label));

    if has_date_column {
        SheetDescriptor { name: format!("Transaction_{}", idx), show_header: true }
    } else {
        SheetDescriptor { name: format!("Summary_{}", idx), show_header: !numeric_only }
    }
}
