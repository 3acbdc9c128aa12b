//! Filter to the user's budget.
//!
//! Keeps records whose derived cost lies in `[price_min, price_max]`, both
//! ends inclusive. With no minimum only the upper bound applies.

use crate::query::UserQuery;
use crate::traits::Filter;
use data_loader::PreprocessedRecord;

/// Removes records outside the query's price bounds.
///
/// A record whose cost could not be derived is never within budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceRangeFilter;

impl PriceRangeFilter {
    fn accepts(cost: f64, query: &UserQuery) -> bool {
        cost <= query.price_max() && query.price_min().is_none_or(|min| cost >= min)
    }
}

impl Filter for PriceRangeFilter {
    fn name(&self) -> &str {
        "PriceRangeFilter"
    }

    fn apply<'a>(
        &self,
        records: Vec<&'a PreprocessedRecord>,
        query: &UserQuery,
    ) -> Vec<&'a PreprocessedRecord> {
        records
            .into_iter()
            .filter(|record| {
                record
                    .cost_value
                    .is_some_and(|cost| Self::accepts(cost, query))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RawRecord;

    fn record(cost: Option<f64>) -> PreprocessedRecord {
        PreprocessedRecord {
            raw: RawRecord::new(vec![]),
            rating_value: None,
            cost_value: cost,
            votes_value: 0,
        }
    }

    fn costs(records: &[&PreprocessedRecord]) -> Vec<Option<f64>> {
        records.iter().map(|r| r.cost_value).collect()
    }

    #[test]
    fn test_max_only() {
        let records = [record(Some(400.0)), record(Some(600.0)), record(Some(601.0))];
        let query = UserQuery::new("x", 600.0, None).unwrap();

        let filtered = PriceRangeFilter.apply(records.iter().collect(), &query);
        assert_eq!(costs(&filtered), vec![Some(400.0), Some(600.0)]);
    }

    #[test]
    fn test_inclusive_range() {
        let records = [
            record(Some(299.0)),
            record(Some(300.0)),
            record(Some(800.0)),
            record(Some(801.0)),
        ];
        let query = UserQuery::new("x", 800.0, Some(300.0)).unwrap();

        let filtered = PriceRangeFilter.apply(records.iter().collect(), &query);
        assert_eq!(costs(&filtered), vec![Some(300.0), Some(800.0)]);
    }

    #[test]
    fn test_unknown_cost_excluded() {
        let records = [record(None), record(Some(100.0))];
        let query = UserQuery::new("x", 1_000_000.0, Some(0.0)).unwrap();

        let filtered = PriceRangeFilter.apply(records.iter().collect(), &query);
        assert_eq!(costs(&filtered), vec![Some(100.0)]);
    }
}
