//! End-to-end pipeline runs: acquire, preprocess, filter.
//!
//! ## Algorithm
//! 1. Ask the `DatasetSource` for the raw dataset (network, cache, whatever
//!    it does is its own business)
//! 2. Preprocess it into derived ratings, costs and votes
//! 3. Keep records in the query city whose cost fits the budget
//!
//! The filter step works on borrowed records; `run_pipeline` copies the
//! survivors out so the caller gets a standalone dataset.

use crate::filter_pipeline::FilterPipeline;
use crate::query::{AllowedCities, UserQuery};
use anyhow::{Context, Result};
use data_loader::{ColumnConfig, Dataset, PreprocessedDataset, PreprocessedRecord, preprocess};
use sources::DatasetSource;
use tracing::{info, instrument};

/// Filter a preprocessed dataset to the query's city and budget.
///
/// Returns references into `dataset`, in dataset order. An empty result is a
/// normal outcome, not an error.
pub fn filter_by_city_and_price<'a>(
    dataset: &'a PreprocessedDataset,
    query: &UserQuery,
    columns: &ColumnConfig,
) -> Vec<&'a PreprocessedRecord> {
    FilterPipeline::city_and_price(dataset, columns).apply(dataset.records().iter().collect(), query)
}

/// Load the raw dataset from a source and preprocess it.
pub fn load_and_preprocess(
    source: &impl DatasetSource,
    columns: &ColumnConfig,
) -> Result<PreprocessedDataset> {
    let raw = source
        .load()
        .with_context(|| format!("Failed to load dataset from {}", source.name()))?;
    info!("Loaded {} raw records from {}", raw.len(), source.name());
    Ok(preprocess(&raw, columns))
}

/// Load, preprocess and filter in one go.
#[instrument(skip_all, fields(city = %query.city(), max = query.price_max()))]
pub fn run_pipeline(
    source: &impl DatasetSource,
    columns: &ColumnConfig,
    query: &UserQuery,
) -> Result<PreprocessedDataset> {
    let dataset = load_and_preprocess(source, columns)?;
    let matches: Vec<PreprocessedRecord> = filter_by_city_and_price(&dataset, query, columns)
        .into_iter()
        .cloned()
        .collect();
    info!("{} of {} records match", matches.len(), dataset.len());

    Ok(PreprocessedDataset::with_records(dataset.columns().to_vec(), matches))
}

/// The distinct cities a raw dataset lists, for city validation.
///
/// Empty when the dataset has no city column.
pub fn allowed_cities(dataset: &Dataset, columns: &ColumnConfig) -> AllowedCities {
    match dataset.column_index(&columns.city) {
        Some(idx) => dataset.records().iter().filter_map(|r| r.get(idx)).collect(),
        None => AllowedCities::default(),
    }
}
