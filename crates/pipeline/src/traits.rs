//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to restaurant records.

use crate::query::UserQuery;
use data_loader::PreprocessedRecord;

/// Core trait for filtering records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - Filters take ownership of the `Vec` of references and return the
///   survivors, so records are never cloned while filtering
/// - Filters keep the relative order of their input
/// - Filtering is total: a query that matches nothing yields an empty `Vec`
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of records.
    ///
    /// # Arguments
    /// * `records` - The records to filter (takes ownership)
    /// * `query` - The validated user query
    fn apply<'a>(
        &self,
        records: Vec<&'a PreprocessedRecord>,
        query: &UserQuery,
    ) -> Vec<&'a PreprocessedRecord>;
}
