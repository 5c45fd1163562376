// src/pipeline.rs
use crate::analysis::DocumentAnalysis;
use crate::dates::format::{self, DateFormat};
use crate::dates::{annotate_year, extract_start_year, FiscalConfig};
use crate::tables::{classify, consolidate, CellValue, SheetDescriptor, Table};
use crate::utils::error::DateError;
use serde::Serialize;
use std::collections::BTreeSet;

/// Options the caller supplies per run.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub fiscal: Option<FiscalConfig>,
}

/// One output sheet: the consolidated table plus how it should be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedSheet {
    #[serde(flatten)]
    pub descriptor: SheetDescriptor,
    #[serde(flatten)]
    pub table: Table,
    /// Distinct fiscal years of the dates in this sheet, ascending.
    /// Empty when no fiscal start was configured.
    pub fiscal_years: Vec<i32>,
}

/// Consolidates, repairs and classifies the tables of one document.
pub fn process(analysis: &DocumentAnalysis, config: &PipelineConfig) -> Result<Vec<ClassifiedSheet>, DateError> {
    // 1. Merge page fragments
    let mut tables = consolidate(analysis.tables.clone());
    tracing::info!("Consolidated {} table(s) into {}", analysis.tables.len(), tables.len());

    // 2. Repair year-less dates
    let repaired = repair_dates(&mut tables, &analysis.text)?;
    if repaired > 0 {
        tracing::info!("Added a year to {} day/month date(s)", repaired);
    }

    // 3. Classify and tag fiscal years
    let sheets = tables
        .into_iter()
        .enumerate()
        .map(|(i, table)| {
            let descriptor = classify(&table.columns, i + 1);
            let fiscal_years = config.fiscal.map(|fiscal| fiscal_years(&table, &fiscal)).unwrap_or_default();
            tracing::debug!(
                "Sheet '{}' (header shown: {}, {} row(s))",
                descriptor.name,
                descriptor.show_header,
                table.row_count()
            );
            ClassifiedSheet { descriptor, table, fiscal_years }
        })
        .collect();

    Ok(sheets)
}

/// Appends the document's start year to every day/month text cell.
/// The document text is only scanned when at least one cell needs it.
pub fn repair_dates(tables: &mut [Table], text: &str) -> Result<usize, DateError> {
    let needs_year = |cell: &CellValue| {
        cell.as_text().and_then(DateFormat::detect) == Some(DateFormat::DayMonth)
    };

    if !tables.iter().flat_map(Table::cells).any(needs_year) {
        return Ok(0);
    }

    let start_year = extract_start_year(text)?;
    let mut repaired = 0;
    for cell in tables.iter_mut().flat_map(Table::cells_mut) {
        if !needs_year(&*cell) {
            continue;
        }
        if let CellValue::Text(s) = cell {
            *s = annotate_year(s, start_year);
            repaired += 1;
        }
    }
    Ok(repaired)
}

fn fiscal_years(table: &Table, fiscal: &FiscalConfig) -> Vec<i32> {
    table
        .cells()
        .filter_map(|cell| match cell {
            CellValue::Date(date) => Some(*date),
            CellValue::Text(s) => format::parse_any(s),
            _ => None,
        })
        .map(|date| fiscal.fiscal_year(date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::model::ColumnLabel;
    use chrono::NaiveDate;

    fn statement(text: &str, tables: Vec<Table>) -> DocumentAnalysis {
        DocumentAnalysis { text: text.to_string(), tables }
    }

    fn txn_page(dates: &[&str]) -> Table {
        Table::new(
            vec!["Txn Date".into(), "Amount".into()],
            dates.iter().map(|d| vec![CellValue::from(*d), CellValue::Number(1.0)]).collect(),
        )
    }

    #[test]
    fn test_process_end_to_end() {
        let summary = Table::new(
            vec![ColumnLabel::Int(0), ColumnLabel::Int(1)],
            vec![vec!["Opening".into(), 100.0.into()]],
        );
        let analysis = statement(
            "Statement period 01/04/2023 to 31/03/2024",
            vec![summary, txn_page(&["15/12", "31/12"]), txn_page(&["01/01", "2024-04-02"])],
        );
        let config = PipelineConfig { fiscal: Some(FiscalConfig::new(4, 1).unwrap()) };

        let sheets = process(&analysis, &config).unwrap();
        assert_eq!(sheets.len(), 2);

        assert_eq!(sheets[0].descriptor, SheetDescriptor { name: "Summary_1".into(), show_header: false });
        assert!(sheets[0].fiscal_years.is_empty());

        let txns = &sheets[1];
        assert_eq!(txns.descriptor.name, "Transaction_2");
        let dates: Vec<&str> = txns.table.rows.iter().filter_map(|r| r[0].as_text()).collect();
        assert_eq!(dates, vec!["15/12/2023", "31/12/2023", "01/01/2024", "2024-04-02"]);
        assert_eq!(txns.fiscal_years, vec![2024, 2025]);
    }

    #[test]
    fn test_missing_start_year_propagates() {
        let analysis = statement("no dates here", vec![txn_page(&["15/03"])]);
        let err = process(&analysis, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, DateError::NoDateFound));
    }

    #[test]
    fn test_text_not_scanned_without_yearless_dates() {
        let analysis = statement("no dates here", vec![txn_page(&["15/03/2022"])]);
        let sheets = process(&analysis, &PipelineConfig::default()).unwrap();
        assert_eq!(sheets[0].table.rows[0][0], CellValue::from("15/03/2022"));
        assert!(sheets[0].fiscal_years.is_empty());
    }

    #[test]
    fn test_date_cells_count_towards_fiscal_years() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 30).unwrap();
        let table = Table::new(vec!["Value Date".into()], vec![vec![CellValue::Date(date)]]);
        let fiscal = FiscalConfig::new(7, 1).unwrap();
        assert_eq!(fiscal_years(&table, &fiscal), vec![2021]);
    }
}
