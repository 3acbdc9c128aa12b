//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::filters::{CityFilter, PriceRangeFilter};
use crate::query::UserQuery;
use crate::traits::Filter;
use data_loader::{ColumnConfig, PreprocessedDataset, PreprocessedRecord};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(CityFilter::for_dataset(&dataset, &columns))
///     .add_filter(PriceRangeFilter);
///
/// let filtered = pipeline.apply(dataset.records().iter().collect(), &query);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The city + budget pipeline for a preprocessed dataset.
    pub fn city_and_price(dataset: &PreprocessedDataset, columns: &ColumnConfig) -> Self {
        Self::new()
            .add_filter(CityFilter::for_dataset(dataset, columns))
            .add_filter(PriceRangeFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the records.
    ///
    /// ## Algorithm
    /// 1. Start with the input records
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set, in input order
    pub fn apply<'a>(
        &self,
        records: Vec<&'a PreprocessedRecord>,
        query: &UserQuery,
    ) -> Vec<&'a PreprocessedRecord> {
        let mut current = records;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, query);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
