//! Pipeline for validating queries and filtering restaurant records.
//!
//! This crate provides:
//! - Query validation: `build_query` turns raw city/price input into a
//!   `UserQuery` or a precise `QueryError`
//! - Filter trait and implementations (city, price range)
//! - FilterPipeline for composing filters
//! - End-to-end runs over any `DatasetSource`
//!
//! ## Architecture
//! A query travels through these stages:
//! 1. Validation builds an immutable `UserQuery`
//! 2. The source hands over the raw dataset, which is preprocessed
//! 3. Filters keep records in the requested city and budget
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{QueryRequest, run_pipeline};
//!
//! let query = QueryRequest::new("Banashankari").price(600).build()?;
//! let matches = run_pipeline(&source, &columns, &query)?;
//! println!("{} restaurants", matches.len());
//! ```

pub mod engine;
pub mod filter_pipeline;
pub mod filters;
pub mod query;
pub mod traits;

// Re-export main types
pub use engine::{allowed_cities, filter_by_city_and_price, load_and_preprocess, run_pipeline};
pub use filter_pipeline::FilterPipeline;
pub use query::{
    AllowedCities, PriceInput, QueryError, QueryRequest, UserQuery, build_query, parse_price,
    validate_city, validate_price,
};
pub use traits::Filter;
