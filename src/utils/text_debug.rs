// src/utils/text_debug.rs
use std::fs;
use std::path::Path;
use regex::Regex;
use crate::utils::error::StorageError;

/// Wraps every match of `re` in `[[...]]` so the spans a scanner picked up can be eyeballed.
pub fn annotate_matches(text: &str, re: &Regex) -> (String, usize) {
    let mut annotated = String::with_capacity(text.len());
    let mut last_pos = 0;
    let mut count = 0;

    for mat in re.find_iter(text) {
        annotated.push_str(&text[last_pos..mat.start()]);
        annotated.push_str("[[");
        annotated.push_str(mat.as_str());
        annotated.push_str("]]");
        last_pos = mat.end();
        count += 1;
    }
    annotated.push_str(&text[last_pos..]);

    (annotated, count)
}

/// Saves an annotated copy of the document text next to the job output.
pub fn save_debug_text(text: &str, path: &Path, re: &Regex) -> Result<usize, StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let (annotated, count) = annotate_matches(text, re);
    fs::write(path, annotated)?;

    tracing::info!("Saved debug text with {} highlighted match(es) to {}", count, path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::start_year::STATEMENT_PERIOD_RE;

    #[test]
    fn test_annotate_statement_spans() {
        let text = "Bank of X\nSTATEMENT DATE 05/06/23\nPage 1";
        let (annotated, count) = annotate_matches(text, &STATEMENT_PERIOD_RE);
        assert_eq!(count, 1);
        assert!(annotated.contains("[[STATEMENT DATE 05/06/23]]"), "Got: {}", annotated);
        assert!(annotated.ends_with("Page 1"));
    }
}
