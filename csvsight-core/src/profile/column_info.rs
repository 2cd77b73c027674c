//! Per-column metadata profiling.
//!
//! Emits one [`ColumnInfo`] row per column of the source table: type label,
//! non-missing/missing counts, missing percentage, and distinct cardinality.

use crate::models::Table;

use super::models::ColumnInfo;

/// Builds the per-column metadata table.
///
/// Rows appear in the table's original column order. This function always
/// succeeds: a zero-column table produces an empty result, and a zero-row
/// table produces all-zero counts with a 0 missing percentage.
pub fn column_info(table: &Table) -> Vec<ColumnInfo> {
    let row_count = table.row_count();

    table
        .columns()
        .iter()
        .map(|column| {
            ColumnInfo::new(
                &column.name,
                column.data_type,
                row_count,
                column.missing_count(),
                column.distinct_count(),
            )
        })
        .collect()
}
