//! Profiler facade.
//!
//! Bundles the three summary computations and the scalar table metrics into
//! one [`TableProfile`], with memoization over repeated displays of the same
//! table.

use crate::models::Table;

use super::cache::ProfileCache;
use super::categorical::categorical_summaries;
use super::column_info::column_info;
use super::models::TableProfile;
use super::numeric::numeric_summaries;

/// Computes a complete profile of a table.
///
/// Pure and idempotent: profiling the same table twice yields identical
/// summary tables.
pub fn profile_table(table: &Table) -> TableProfile {
    TableProfile::new(table.name(), table.row_count(), table.column_count())
        .with_missing_percentage(table.missing_cell_percentage())
        .with_duplicate_row_count(table.duplicate_row_count())
        .with_columns(column_info(table))
        .with_numeric(numeric_summaries(table))
        .with_categorical(categorical_summaries(table))
}

/// Profiler with a content-keyed memoization layer.
///
/// Redisplaying an unchanged table returns the cached profile; any new
/// upload has a new fingerprint and recomputes.
#[derive(Debug, Default)]
pub struct TableProfiler {
    cache: ProfileCache,
}

impl TableProfiler {
    /// Creates a profiler with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Profiles a table, reusing the memoized result when available.
    pub fn profile(&mut self, table: &Table) -> TableProfile {
        let fingerprint = table.fingerprint();
        if let Some(cached) = self.cache.get(fingerprint) {
            tracing::debug!(source = table.name(), "profile cache hit");
            return cached;
        }

        let profile = profile_table(table);
        self.cache.insert(fingerprint, profile.clone());
        profile
    }

    /// Read access to the memoization layer.
    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }
}
