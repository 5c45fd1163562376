// src/tables/consolidate.rs
use crate::tables::model::Table;
use crate::tables::signature;
use std::collections::VecDeque;

/// Merges table fragments that share a header signature (typically one
/// logical table split across document pages).
///
/// Seeds are taken from the front of the working list. For each seed the
/// remaining tables are scanned back to front, and every match is pulled out
/// in that order. The merged rows are: seed rows, then the matches in
/// collection order, so a later page lands before an earlier one when three
/// or more fragments match. Output order is the order seeds were taken.
pub fn consolidate(tables: Vec<Table>) -> Vec<Table> {
    let mut pending: VecDeque<Table> = tables.into();
    let mut merged = Vec::new();

    while let Some(seed) = pending.pop_front() {
        let mut collected = Vec::new();
        let mut remaining = Vec::with_capacity(pending.len());

        // Walk from the back, pulling matches; survivors are pushed in reverse
        // and flipped afterwards to keep their original relative order.
        while let Some(candidate) = pending.pop_back() {
            if signature::matches(&seed, &candidate) {
                collected.push(candidate);
            } else {
                remaining.push(candidate);
            }
        }
        remaining.reverse();
        pending = remaining.into();

        if collected.is_empty() {
            merged.push(seed);
            continue;
        }

        tracing::debug!(
            "Merging {} fragment(s) into table with {} column(s)",
            collected.len(),
            seed.columns.len()
        );
        let mut table = seed;
        for fragment in collected {
            table.rows.extend(fragment.rows);
        }
        merged.push(table);
    }

    merged
}
