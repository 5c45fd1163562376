// src/export/mod.rs
use crate::pipeline::ClassifiedSheet;
use crate::tables::CellValue;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

// Characters that spreadsheet range notation will not accept in a title.
static SHEET_TITLE_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("Failed to compile SHEET_TITLE_STRIP_RE"));

// Currency symbols and thousands separators, removed so amounts land as plain numbers.
static CURRENCY_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[$,€¥£₹]").expect("Failed to compile CURRENCY_STRIP_RE"));

/// Values for one sheet, addressed from its top-left cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetRange {
    pub range: String,
    pub values: Vec<Vec<Value>>,
}

/// Batch values update for the hosted spreadsheet service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncPayload {
    #[serde(rename = "valueInputOption")]
    pub value_input_option: &'static str,
    pub data: Vec<SheetRange>,
}

pub fn sanitize_sheet_name(name: &str) -> String {
    SHEET_TITLE_STRIP_RE.replace_all(name, "").into_owned()
}

fn cell_to_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Empty => Value::String(String::new()),
        CellValue::Number(x) => serde_json::Number::from_f64(*x).map(Value::Number).unwrap_or_default(),
        CellValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        CellValue::Text(s) => Value::String(CURRENCY_STRIP_RE.replace_all(s, "").into_owned()),
    }
}

/// Builds the sync payload; header rows are only sent for sheets that show them.
pub fn build_sync_payload(sheets: &[ClassifiedSheet]) -> SyncPayload {
    let data = sheets
        .iter()
        .map(|sheet| {
            let mut values: Vec<Vec<Value>> = Vec::with_capacity(sheet.table.row_count() + 1);
            if sheet.descriptor.show_header {
                values.push(sheet.table.columns.iter().map(|c| Value::String(c.to_string())).collect());
            }
            values.extend(sheet.table.rows.iter().map(|row| row.iter().map(cell_to_value).collect::<Vec<_>>()));
            SheetRange { range: format!("{}!A1", sanitize_sheet_name(sheet.descriptor.name.trim())), values }
        })
        .collect();

    SyncPayload { value_input_option: "RAW", data }
}
