//! Column profiling module.
//!
//! This module derives the dashboard's summary tables from a loaded table:
//! - **Column info**: per-column type, missing counts, and cardinality
//! - **Numeric statistics**: describe()-style aggregates for numeric columns
//! - **Categorical statistics**: cardinality and mode for everything else
//!
//! All computations are pure functions of the table content. The numeric and
//! categorical tables are `Option`al: `None` means the table has no columns
//! of that kind, which callers must render differently from an empty result.

mod cache;
mod categorical;
mod column_info;
mod models;
mod numeric;
mod profiler;

// Re-export public API
pub use cache::ProfileCache;
pub use categorical::categorical_summaries;
pub use column_info::column_info;
pub use models::{CategoricalSummary, ColumnInfo, NumericSummary, TableProfile};
pub use numeric::numeric_summaries;
pub use profiler::{TableProfiler, profile_table};
