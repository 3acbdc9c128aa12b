//! # Data Loader Crate
//!
//! This crate holds the restaurant dataset and turns its free-form text
//! columns into numbers the filter can work with.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RawRecord, Dataset, PreprocessedRecord, PreprocessedDataset)
//! - **normalize**: Parse rating, cost and vote text into numeric values
//! - **preprocess**: Apply the normalizer across a whole dataset
//! - **config**: Column names used to find fields in a record
//! - **cache**: Flat JSON cache file for a raw dataset
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{preprocess, CacheFile, ColumnConfig};
//!
//! let dataset = CacheFile::new("data/zomato_data.json").read()?;
//! let preprocessed = preprocess(&dataset, &ColumnConfig::default());
//!
//! for record in preprocessed.records() {
//!     println!("{:?} {:?}", record.cost_value, record.rating_value);
//! }
//! ```

// Public modules
pub mod cache;
pub mod config;
pub mod error;
pub mod normalize;
pub mod preprocess;
pub mod types;

// Re-export commonly used types for convenience
pub use cache::CacheFile;
pub use config::ColumnConfig;
pub use error::{DataLoadError, Result};
pub use normalize::{parse_cost, parse_rating, parse_votes};
pub use preprocess::preprocess;
pub use types::{Dataset, PreprocessedDataset, PreprocessedRecord, RawRecord};
