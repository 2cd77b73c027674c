//! Descriptive statistics for numeric columns.
//!
//! Mirrors the classic describe() table: count, mean, sample standard
//! deviation, min, quartiles, max. Only finite recorded values participate;
//! missing cells are skipped everywhere.

use crate::models::{CellValue, DataType, Table};

use super::models::NumericSummary;

/// Builds the numeric statistics table.
///
/// Returns `None` when the table has no numeric columns at all, so callers
/// can distinguish "no numeric data" from "empty statistics". Otherwise one
/// row per numeric column, in original column order.
pub fn numeric_summaries(table: &Table) -> Option<Vec<NumericSummary>> {
    let numeric_columns: Vec<_> = table
        .columns()
        .iter()
        .filter(|column| column.data_type == DataType::Numeric)
        .collect();

    if numeric_columns.is_empty() {
        return None;
    }

    Some(
        numeric_columns
            .into_iter()
            .map(|column| {
                let values: Vec<f64> = column
                    .cells
                    .iter()
                    .filter_map(|cell| match cell {
                        CellValue::Number(n) => Some(*n),
                        _ => None,
                    })
                    .collect();
                summarize(&column.name, &values)
            })
            .collect(),
    )
}

fn summarize(name: &str, values: &[f64]) -> NumericSummary {
    let count = values.len() as u64;
    let (mean, std_dev) = mean_and_sample_std(values);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let (min, q25, median, q75, max) = if sorted.is_empty() {
        (None, None, None, None, None)
    } else {
        (
            sorted.first().copied(),
            Some(percentile(&sorted, 0.25)),
            Some(percentile(&sorted, 0.50)),
            Some(percentile(&sorted, 0.75)),
            sorted.last().copied(),
        )
    };

    NumericSummary {
        name: name.to_string(),
        count,
        mean,
        std_dev,
        min,
        q25,
        median,
        q75,
        max,
    }
}

/// Calculates the mean and sample standard deviation (N-1 denominator).
///
/// The mean is `None` for an empty slice; the deviation is `None` below two
/// values, where the N-1 denominator leaves it undefined.
fn mean_and_sample_std(values: &[f64]) -> (Option<f64>, Option<f64>) {
    if values.is_empty() {
        return (None, None);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    if values.len() < 2 {
        return (Some(mean), None);
    }

    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (Some(mean), Some(variance.sqrt()))
}

/// Interpolated percentile over a sorted, non-empty slice.
///
/// Uses linear interpolation between closest ranks: the rank of fraction `p`
/// is `p * (n - 1)`, and fractional ranks interpolate between neighbors.
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}
