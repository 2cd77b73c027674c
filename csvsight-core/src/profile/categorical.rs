//! Descriptive statistics for categorical columns.
//!
//! Every column not typed numeric is categorical: text, boolean, temporal,
//! and mixed columns all land here. The mode tie-break is fixed to the value
//! seen first in row order, keeping repeated profiling runs deterministic.

use std::collections::HashMap;

use crate::models::{CellValue, Table};

use super::models::CategoricalSummary;

/// Frequency bookkeeping per distinct value.
struct ValueFrequency {
    count: u64,
    first_index: usize,
}

/// Builds the categorical statistics table.
///
/// Returns `None` when the table has no categorical columns at all.
/// Otherwise one row per categorical column, in original column order; an
/// entirely-missing column reports zero counts with absent mode fields.
pub fn categorical_summaries(table: &Table) -> Option<Vec<CategoricalSummary>> {
    let categorical_columns: Vec<_> = table
        .columns()
        .iter()
        .filter(|column| column.data_type.is_categorical())
        .collect();

    if categorical_columns.is_empty() {
        return None;
    }

    Some(
        categorical_columns
            .into_iter()
            .map(|column| summarize(&column.name, &column.cells))
            .collect(),
    )
}

fn summarize(name: &str, cells: &[CellValue]) -> CategoricalSummary {
    let mut frequencies: HashMap<String, ValueFrequency> = HashMap::new();
    let mut count: u64 = 0;

    for (index, cell) in cells.iter().enumerate() {
        let Some(key) = cell.comparison_key() else {
            continue;
        };
        count += 1;
        frequencies
            .entry(key)
            .and_modify(|freq| freq.count += 1)
            .or_insert(ValueFrequency {
                count: 1,
                first_index: index,
            });
    }

    let mode_entry = frequencies.iter().max_by(|(_, a), (_, b)| {
        // Higher count wins; equal counts break to the earlier first sighting
        a.count
            .cmp(&b.count)
            .then(b.first_index.cmp(&a.first_index))
    });

    let (mode, mode_count) = match mode_entry {
        Some((value, freq)) => (Some(value.clone()), Some(freq.count)),
        None => (None, None),
    };

    CategoricalSummary {
        name: name.to_string(),
        count,
        distinct_count: frequencies.len() as u64,
        mode,
        mode_count,
    }
}
