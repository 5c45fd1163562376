// src/tables/signature.rs
use crate::tables::model::{ColumnLabel, Table};

/// Header signature used as the merge key between table fragments.
/// Text labels are trimmed; numeric labels pass through untouched.
pub fn signature(table: &Table) -> Vec<ColumnLabel> {
    table
        .columns
        .iter()
        .map(|label| match label {
            ColumnLabel::Text(s) => ColumnLabel::Text(s.trim().to_string()),
            other => other.clone(),
        })
        .collect()
}

/// True when both tables carry the same signature, element-wise and in order.
/// Comparison is case-sensitive and type-sensitive.
pub fn matches(a: &Table, b: &Table) -> bool {
    signature(a) == signature(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(labels: Vec<ColumnLabel>) -> Table {
        Table::new(labels, Vec::new())
    }

    #[test]
    fn test_signature_trims_text_only() {
        let t = table(vec![" Date ".into(), ColumnLabel::Int(3), "\tAmount".into()]);
        assert_eq!(signature(&t), vec!["Date".into(), ColumnLabel::Int(3), "Amount".into()]);
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        assert!(!matches(&table(vec!["Amount".into()]), &table(vec!["amount".into()])));
    }

    #[test]
    fn test_matches_ignores_surrounding_whitespace() {
        assert!(matches(
            &table(vec!["Date".into(), "Amount ".into()]),
            &table(vec![" Date".into(), "Amount".into()])
        ));
    }

    #[test]
    fn test_matches_requires_same_order_and_length() {
        let a = table(vec!["Date".into(), "Amount".into()]);
        assert!(!matches(&a, &table(vec!["Amount".into(), "Date".into()])));
        assert!(!matches(&a, &table(vec!["Date".into()])));
        assert!(!matches(&table(vec![ColumnLabel::Int(1)]), &table(vec![ColumnLabel::Float(1.0)])));
    }
}
