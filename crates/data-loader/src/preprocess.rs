//! Preprocessor: derive numeric rating, cost and votes for every record.
//!
//! The raw dataset is borrowed, never modified; the output is a new
//! `PreprocessedDataset` with the same header and the same rows in the same
//! order, each carrying its derived values alongside the original text.

use crate::config::ColumnConfig;
use crate::normalize::{parse_cost, parse_rating, parse_votes};
use crate::types::{Dataset, PreprocessedDataset, PreprocessedRecord, RawRecord};
use tracing::{debug, warn};

/// Preprocess a raw dataset.
///
/// Missing columns are not an error. Without a cost column every
/// `cost_value` is `None`; the same goes for rating. Without a votes column
/// every `votes_value` is 0.
pub fn preprocess(dataset: &Dataset, columns: &ColumnConfig) -> PreprocessedDataset {
    let rating_idx = dataset.column_index(&columns.rating);
    let cost_idx = dataset.column_index(&columns.cost);
    let votes_idx = dataset.column_index(&columns.votes);

    if cost_idx.is_none() {
        warn!(column = %columns.cost, "Cost column missing; all costs treated as unknown");
    }
    if rating_idx.is_none() {
        debug!(column = %columns.rating, "Rating column missing");
    }

    let records: Vec<PreprocessedRecord> = dataset
        .records()
        .iter()
        .map(|raw| derive_record(raw, rating_idx, cost_idx, votes_idx))
        .collect();

    let with_cost = records.iter().filter(|r| r.cost_value.is_some()).count();
    let with_rating = records.iter().filter(|r| r.rating_value.is_some()).count();
    debug!(
        "Preprocessed {} records ({} with cost, {} with rating)",
        records.len(),
        with_cost,
        with_rating
    );

    PreprocessedDataset::with_records(dataset.columns().to_vec(), records)
}

fn derive_record(
    raw: &RawRecord,
    rating_idx: Option<usize>,
    cost_idx: Option<usize>,
    votes_idx: Option<usize>,
) -> PreprocessedRecord {
    PreprocessedRecord {
        raw: raw.clone(),
        rating_value: parse_rating(cell(raw, rating_idx)),
        cost_value: parse_cost(cell(raw, cost_idx)),
        votes_value: parse_votes(cell(raw, votes_idx)),
    }
}

fn cell(raw: &RawRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| raw.get(i))
}
