//! Core data structures and profiling logic for CSVSight.
//!
//! This crate turns an uploaded delimited text file into a typed in-memory
//! table and derives its dashboard summaries: per-column metadata, numeric
//! descriptive statistics, and categorical descriptive statistics, plus the
//! scalar shape/missing/duplicate metrics.
//!
//! # Architecture
//! - [`loader`] decodes bytes (UTF-8 with Latin-1 fallback), parses the
//!   delimited text, and assigns each column its type once, at load time.
//! - [`profile`] holds pure, stateless summary computations over the loaded
//!   table, with an explicit content-keyed memoization layer.
//! - The presentation layer lives in the `csvsight` binary and is a pure
//!   consumer of this crate.

pub mod error;
pub mod loader;
pub mod logging;
pub mod models;
pub mod profile;

// Re-export commonly used types
pub use error::{CsvSightError, Result};
pub use loader::{LoaderConfig, load_bytes, load_path};
pub use logging::init_logging;
pub use models::{CellValue, Column, DataType, Table};
pub use profile::{
    CategoricalSummary, ColumnInfo, NumericSummary, ProfileCache, TableProfile, TableProfiler,
    categorical_summaries, column_info, numeric_summaries, profile_table,
};
