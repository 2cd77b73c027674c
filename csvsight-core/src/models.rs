//! Core data model for in-memory tabular datasets.
//!
//! A [`Table`] is an ordered sequence of named, typed columns with cell
//! sequences aligned across columns. Column types are assigned once, at load
//! time; the profiler never re-infers them. Missing cells are a distinguished
//! marker, distinct from an empty string or zero.

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CsvSightError, Result};

/// Sentinel used when folding missing cells into row/distinct comparison keys.
const MISSING_KEY: &str = "__MISSING__";

/// Separator between cell keys inside a row comparison key.
const ROW_KEY_SEPARATOR: char = '\u{1f}';

/// Declared data type of a column, assigned at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Values support arithmetic (integer or floating-point)
    Numeric,
    /// Free-form text
    Text,
    /// Boolean values
    Boolean,
    /// Dates and timestamps
    Temporal,
    /// A mixture of value classes within one column
    Mixed,
}

impl DataType {
    /// Returns true for every type the profiler treats as categorical.
    pub fn is_categorical(&self) -> bool {
        !matches!(self, DataType::Numeric)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Numeric => write!(f, "numeric"),
            DataType::Text => write!(f, "text"),
            DataType::Boolean => write!(f, "boolean"),
            DataType::Temporal => write!(f, "temporal"),
            DataType::Mixed => write!(f, "mixed"),
        }
    }
}

/// A single cell value.
///
/// `Missing` is the absence marker: it is excluded from distinct counts,
/// mode frequencies, and every descriptive statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellValue {
    /// No recorded value
    Missing,
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Date or timestamp value
    Temporal(NaiveDateTime),
    /// Text value
    Text(String),
}

impl CellValue {
    /// Returns true when the cell holds no recorded value.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Canonical string used to compare cells for distinct counting, mode
    /// frequency, and duplicate-row detection. `None` for missing cells.
    pub fn comparison_key(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Boolean(b) => Some(b.to_string()),
            CellValue::Temporal(t) => Some(t.format("%Y-%m-%d %H:%M:%S").to_string()),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Temporal(t) => {
                // Dates loaded without a time component render without one
                if t.time() == chrono::NaiveTime::MIN {
                    write!(f, "{}", t.format("%Y-%m-%d"))
                } else {
                    write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A named, typed column with its ordered cell sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Type tag assigned at load time
    pub data_type: DataType,
    /// Cell values, aligned with every other column of the table
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Creates a new column.
    pub fn new(name: impl Into<String>, data_type: DataType, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            data_type,
            cells,
        }
    }

    /// Count of cells holding a recorded value.
    pub fn non_missing_count(&self) -> u64 {
        self.cells.iter().filter(|cell| !cell.is_missing()).count() as u64
    }

    /// Count of missing cells.
    pub fn missing_count(&self) -> u64 {
        self.cells.iter().filter(|cell| cell.is_missing()).count() as u64
    }

    /// Count of distinct non-missing values.
    pub fn distinct_count(&self) -> u64 {
        let distinct: HashSet<String> = self
            .cells
            .iter()
            .filter_map(CellValue::comparison_key)
            .collect();
        distinct.len() as u64
    }
}

/// In-memory tabular dataset: named columns with aligned rows.
///
/// Invariant: every column has the same number of cells, and column names
/// are unique. [`Table::new`] enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Creates a table, validating the aligned-length and unique-name
    /// invariants.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.cells.len();
            for column in &columns {
                if column.cells.len() != expected {
                    return Err(CsvSightError::invalid_table(format!(
                        "column '{}' has {} cells, expected {}",
                        column.name,
                        column.cells.len(),
                        expected
                    )));
                }
            }
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(CsvSightError::invalid_table(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    /// Source name of the dataset (usually the uploaded file name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in their original order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in their original order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows (0 for a zero-column table).
    pub fn row_count(&self) -> u64 {
        self.columns
            .first()
            .map_or(0, |column| column.cells.len() as u64)
    }

    /// Number of columns.
    pub fn column_count(&self) -> u64 {
        self.columns.len() as u64
    }

    /// Total cell count: rows x columns.
    pub fn total_cells(&self) -> u64 {
        self.row_count() * self.column_count()
    }

    /// Total missing cells across all columns.
    pub fn missing_cell_count(&self) -> u64 {
        self.columns.iter().map(Column::missing_count).sum()
    }

    /// Share of missing cells over all cells, as a percentage rounded to two
    /// decimal places. Defined as 0 for a table with no cells.
    pub fn missing_cell_percentage(&self) -> f64 {
        let total = self.total_cells();
        if total == 0 {
            return 0.0;
        }
        round_two(self.missing_cell_count() as f64 / total as f64 * 100.0)
    }

    /// Count of rows that exactly duplicate an earlier row.
    ///
    /// Rows are compared by the comparison keys of their cells; missing cells
    /// compare equal to each other.
    pub fn duplicate_row_count(&self) -> u64 {
        let mut seen_rows: HashSet<String> = HashSet::new();
        let mut duplicate_count: u64 = 0;

        for index in 0..self.row_count() as usize {
            let row_key = self.row_key(index);
            if seen_rows.contains(&row_key) {
                duplicate_count += 1;
            } else {
                seen_rows.insert(row_key);
            }
        }

        duplicate_count
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Vec<&CellValue> {
        self.columns
            .iter()
            .map(|column| &column.cells[index])
            .collect()
    }

    /// Stable content hash identifying this table for memoization.
    ///
    /// Two tables with the same columns, types, and cell values share a
    /// fingerprint; any new upload produces a new one.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for column in &self.columns {
            column.name.hash(&mut hasher);
            column.data_type.hash(&mut hasher);
            for cell in &column.cells {
                match cell.comparison_key() {
                    Some(key) => key.hash(&mut hasher),
                    None => MISSING_KEY.hash(&mut hasher),
                }
            }
        }
        hasher.finish()
    }

    fn row_key(&self, index: usize) -> String {
        let mut key = String::new();
        for column in &self.columns {
            match column.cells[index].comparison_key() {
                Some(cell_key) => key.push_str(&cell_key),
                None => key.push_str(MISSING_KEY),
            }
            key.push(ROW_KEY_SEPARATOR);
        }
        key
    }
}

/// Rounds to two decimal places, the precision displayed for percentages.
pub(crate) fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
