// src/dates/annotate.rs
use crate::dates::format::DateFormat;

// A Jan 1 entry on a statement that starts in the base year belongs to the year after.
const NEW_YEAR: &str = "01/01";

/// Appends `start_year` to a day/month date such as `15/03`.
/// Anything not detected as a bare day/month date is returned as is.
pub fn annotate_year(text: &str, start_year: i32) -> String {
    let trimmed = text.trim();
    if DateFormat::detect(trimmed) != Some(DateFormat::DayMonth) {
        return text.to_string();
    }

    if trimmed == NEW_YEAR {
        format!("{}/{}", trimmed, start_year + 1)
    } else {
        format!("{}/{}", trimmed, start_year)
    }
}
