//! Column naming for the restaurant dataset.
//!
//! Every component that needs to find a field in a record takes a
//! `ColumnConfig` instead of reaching for constants, so tests can run
//! against small synthetic schemas.

use serde::{Deserialize, Serialize};

/// Names of the source columns the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Restaurant name (display only)
    pub name: String,
    /// Free-form rating text such as "4.1/5" or "NEW"
    pub rating: String,
    /// Vote count text
    pub votes: String,
    /// Approximate cost for two people, e.g. "800", "1,000" or "500-1000"
    pub cost: String,
    /// Locality / city label used for matching
    pub city: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            rating: "rate".to_string(),
            votes: "votes".to_string(),
            cost: "approx_cost(for two people)".to_string(),
            city: "listed_in(city)".to_string(),
        }
    }
}
