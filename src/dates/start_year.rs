// src/dates/start_year.rs
use crate::utils::error::DateError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

// Two-digit years at or below this pivot are 20YY, above it 19YY.
const TWO_DIGIT_YEAR_PIVOT: i32 = 50;

const MONTH_NAMES: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

/// Combined statement-period scanner. Alternatives, in precedence order:
/// 1. `01 April 2019 to 31 March 2020`  (full month names, first year captured)
/// 2. `01/04/2019 to 31/03/2020`        (first year captured)
/// 3. `STATEMENT DATE 05/06/23`
/// 4. any bare `05/06/23`
pub(crate) static STATEMENT_PERIOD_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        concat!(
            r"(?i)\b\d{{1,2}}\s+(?:{m})\s+(\d{{4}})\s+to\s+\d{{1,2}}\s+(?:{m})\s+\d{{4}}\b",
            r"|\b\d{{1,2}}/\d{{1,2}}/(\d{{4}})\s+to\s+\d{{1,2}}/\d{{1,2}}/\d{{4}}\b",
            r"|\bSTATEMENT\s+DATE\s*:?\s*\d{{1,2}}/\d{{1,2}}/(\d{{2}})\b",
            r"|\b\d{{1,2}}/\d{{1,2}}/(\d{{2}})\b",
        ),
        m = MONTH_NAMES
    );
    Regex::new(&pattern).expect("Failed to compile STATEMENT_PERIOD_RE")
});

/// Expands a captured year: two digits follow the fixed 50 pivot,
/// four digits pass through.
pub fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    match year.len() {
        2 if value <= TWO_DIGIT_YEAR_PIVOT => Some(2000 + value),
        2 => Some(1900 + value),
        4 => Some(value),
        _ => None,
    }
}

/// Earliest year referenced by a statement period or statement date in `text`.
/// Used as the base year when repairing dates printed without one.
pub fn extract_start_year(text: &str) -> Result<i32, DateError> {
    let mut years = BTreeSet::new();

    for caps in STATEMENT_PERIOD_RE.captures_iter(text) {
        // First non-empty group, in declaration order.
        let captured = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .find(|s| !s.is_empty());

        if let Some(year) = captured.and_then(expand_year) {
            tracing::trace!("Statement period match '{}' -> {}", &caps[0], year);
            years.insert(year);
        }
    }

    let start_year = years.first().copied().ok_or(DateError::NoDateFound)?;
    tracing::debug!("Extracted start year {} from {} distinct year(s)", start_year, years.len());
    Ok(start_year)
}
