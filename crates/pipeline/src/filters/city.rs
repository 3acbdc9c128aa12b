//! Filter to the user's city.
//!
//! Matching is exact after trimming and case-folding both sides, so
//! "Bangalore" matches " bangalore " but not "Bangalore North".

use crate::query::UserQuery;
use crate::traits::Filter;
use data_loader::{ColumnConfig, PreprocessedDataset, PreprocessedRecord};
use tracing::warn;

/// Keeps records whose city cell equals the query city.
///
/// Records with a missing city cell never match. If the dataset has no
/// city column at all, nothing matches.
#[derive(Debug, Clone, Copy)]
pub struct CityFilter {
    city_column: Option<usize>,
}

impl CityFilter {
    /// Create a filter reading the city from the given column position.
    pub fn new(city_column: Option<usize>) -> Self {
        Self { city_column }
    }

    /// Create a filter for a dataset, resolving the configured city column.
    pub fn for_dataset(dataset: &PreprocessedDataset, columns: &ColumnConfig) -> Self {
        let city_column = dataset.column_index(&columns.city);
        if city_column.is_none() {
            warn!(column = %columns.city, "City column missing; no record can match");
        }
        Self::new(city_column)
    }
}

impl Filter for CityFilter {
    fn name(&self) -> &str {
        "CityFilter"
    }

    fn apply<'a>(
        &self,
        records: Vec<&'a PreprocessedRecord>,
        query: &UserQuery,
    ) -> Vec<&'a PreprocessedRecord> {
        let Some(column) = self.city_column else {
            return Vec::new();
        };
        let wanted = query.normalized_city();

        records
            .into_iter()
            .filter(|record| {
                record
                    .text(column)
                    .is_some_and(|city| city.trim().to_lowercase() == wanted)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RawRecord;

    fn record(city: Option<&str>) -> PreprocessedRecord {
        PreprocessedRecord {
            raw: RawRecord::new(vec![Some("Some Place".to_string()), city.map(String::from)]),
            rating_value: None,
            cost_value: Some(500.0),
            votes_value: 0,
        }
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let records = [
            record(Some("Bangalore")),
            record(Some("  BANGALORE ")),
            record(Some("Bangalore North")),
            record(None),
        ];
        let query = UserQuery::new("bangalore", 1000.0, None).unwrap();

        let filtered = CityFilter::new(Some(1)).apply(records.iter().collect(), &query);

        assert_eq!(filtered.len(), 2);
        assert!(std::ptr::eq(filtered[0], &records[0]));
        assert!(std::ptr::eq(filtered[1], &records[1]));
    }

    #[test]
    fn test_missing_city_column_matches_nothing() {
        let records = [record(Some("Bangalore"))];
        let query = UserQuery::new("Bangalore", 1000.0, None).unwrap();

        let filtered = CityFilter::new(None).apply(records.iter().collect(), &query);
        assert!(filtered.is_empty());
    }
}
