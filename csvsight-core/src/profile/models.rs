//! Profile result models.
//!
//! These are the three derived summary tables plus the scalar dashboard
//! metrics, bundled into a [`TableProfile`]. All models are derived data:
//! read-only, recomputed fresh from the uploaded table, serializable for the
//! JSON output format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DataType, round_two};

/// Per-column metadata: one row per column of the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Type tag assigned at load time
    pub data_type: DataType,
    /// Count of cells holding a recorded value
    pub non_missing_count: u64,
    /// Count of missing cells
    pub missing_count: u64,
    /// Missing share of the column, 0-100, two decimal places
    pub missing_percentage: f64,
    /// Count of distinct non-missing values
    pub distinct_count: u64,
}

impl ColumnInfo {
    /// Creates column metadata from raw counts.
    ///
    /// The missing percentage is defined as 0 for a zero-row table.
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        row_count: u64,
        missing_count: u64,
        distinct_count: u64,
    ) -> Self {
        let name = name.into();

        if missing_count > row_count {
            tracing::warn!(
                "Profile anomaly: missing_count ({}) exceeds row_count ({}) for column '{}'",
                missing_count,
                row_count,
                name
            );
        }

        let missing_percentage = if row_count == 0 {
            0.0
        } else {
            round_two(missing_count as f64 / row_count as f64 * 100.0)
        };

        Self {
            name,
            data_type,
            non_missing_count: row_count.saturating_sub(missing_count),
            missing_count,
            missing_percentage,
            distinct_count,
        }
    }
}

/// Descriptive statistics for one numeric column.
///
/// Aggregates are `None` when the column has no recorded values; the sample
/// standard deviation is additionally `None` below two values, where the
/// N-1 denominator leaves it undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Column name
    pub name: String,
    /// Count of non-missing values
    pub count: u64,
    /// Arithmetic mean
    pub mean: Option<f64>,
    /// Sample standard deviation (N-1 denominator)
    pub std_dev: Option<f64>,
    /// Minimum value
    pub min: Option<f64>,
    /// 25th percentile (linear interpolation between closest ranks)
    pub q25: Option<f64>,
    /// 50th percentile
    pub median: Option<f64>,
    /// 75th percentile
    pub q75: Option<f64>,
    /// Maximum value
    pub max: Option<f64>,
}

/// Descriptive statistics for one categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Column name
    pub name: String,
    /// Count of non-missing values
    pub count: u64,
    /// Count of distinct non-missing values
    pub distinct_count: u64,
    /// Most frequent value; ties break to the value seen first in row order
    pub mode: Option<String>,
    /// Frequency of the most frequent value
    pub mode_count: Option<u64>,
}

/// Complete profile of a single table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    /// Source name of the dataset
    pub source_name: String,
    /// Row count of the source table
    pub row_count: u64,
    /// Column count of the source table
    pub column_count: u64,
    /// Missing share over all cells, 0-100, two decimal places
    pub missing_percentage: f64,
    /// Count of rows exactly duplicating an earlier row
    pub duplicate_row_count: u64,
    /// Per-column metadata, in original column order
    pub columns: Vec<ColumnInfo>,
    /// Numeric statistics; `None` when the table has no numeric columns
    pub numeric: Option<Vec<NumericSummary>>,
    /// Categorical statistics; `None` when the table has no categorical columns
    pub categorical: Option<Vec<CategoricalSummary>>,
    /// Timestamp when the profile was computed
    pub profiled_at: DateTime<Utc>,
}

impl TableProfile {
    /// Creates an empty profile for the given table shape.
    pub fn new(source_name: impl Into<String>, row_count: u64, column_count: u64) -> Self {
        Self {
            source_name: source_name.into(),
            row_count,
            column_count,
            missing_percentage: 0.0,
            duplicate_row_count: 0,
            columns: Vec::new(),
            numeric: None,
            categorical: None,
            profiled_at: Utc::now(),
        }
    }

    /// Sets the missing-cell percentage.
    pub fn with_missing_percentage(mut self, percentage: f64) -> Self {
        self.missing_percentage = percentage;
        self
    }

    /// Sets the duplicate-row count.
    pub fn with_duplicate_row_count(mut self, count: u64) -> Self {
        self.duplicate_row_count = count;
        self
    }

    /// Sets the per-column metadata.
    pub fn with_columns(mut self, columns: Vec<ColumnInfo>) -> Self {
        self.columns = columns;
        self
    }

    /// Sets the numeric statistics if present.
    pub fn with_numeric(mut self, numeric: Option<Vec<NumericSummary>>) -> Self {
        self.numeric = numeric;
        self
    }

    /// Sets the categorical statistics if present.
    pub fn with_categorical(mut self, categorical: Option<Vec<CategoricalSummary>>) -> Self {
        self.categorical = categorical;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_info_percentage() {
        let info = ColumnInfo::new("age", DataType::Numeric, 3, 1, 2);
        assert_eq!(info.non_missing_count, 2);
        assert_eq!(info.missing_count, 1);
        assert_eq!(info.missing_percentage, 33.33);
        assert_eq!(info.distinct_count, 2);
    }

    #[test]
    fn test_column_info_zero_rows() {
        let info = ColumnInfo::new("age", DataType::Numeric, 0, 0, 0);
        assert_eq!(info.missing_percentage, 0.0);
        assert_eq!(info.non_missing_count, 0);
    }

    #[test]
    fn test_column_info_anomalous_counts_saturate() {
        // missing_count beyond row_count must not underflow
        let info = ColumnInfo::new("odd", DataType::Text, 2, 5, 0);
        assert_eq!(info.non_missing_count, 0);
    }

    #[test]
    fn test_table_profile_builder() {
        let profile = TableProfile::new("people.csv", 3, 2)
            .with_missing_percentage(16.67)
            .with_duplicate_row_count(0)
            .with_columns(vec![ColumnInfo::new("age", DataType::Numeric, 3, 1, 2)]);

        assert_eq!(profile.source_name, "people.csv");
        assert_eq!(profile.row_count, 3);
        assert_eq!(profile.missing_percentage, 16.67);
        assert_eq!(profile.columns.len(), 1);
        assert!(profile.numeric.is_none());
        assert!(profile.categorical.is_none());
    }

    #[test]
    fn test_table_profile_serde_roundtrip() {
        let profile = TableProfile::new("orders.csv", 10, 3)
            .with_missing_percentage(5.0)
            .with_numeric(Some(vec![NumericSummary {
                name: "amount".to_string(),
                count: 10,
                mean: Some(12.5),
                std_dev: Some(1.5),
                min: Some(10.0),
                q25: Some(11.0),
                median: Some(12.0),
                q75: Some(14.0),
                max: Some(16.0),
            }]))
            .with_categorical(Some(vec![CategoricalSummary {
                name: "status".to_string(),
                count: 10,
                distinct_count: 2,
                mode: Some("active".to_string()),
                mode_count: Some(7),
            }]));

        let json = serde_json::to_string(&profile).unwrap();
        let deserialized: TableProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(profile, deserialized);
    }

    #[test]
    fn test_numeric_summary_null_aggregates_serialize_as_null() {
        let summary = NumericSummary {
            name: "empty".to_string(),
            count: 0,
            mean: None,
            std_dev: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["mean"].is_null());
        assert!(json["std_dev"].is_null());
    }
}
