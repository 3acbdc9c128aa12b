//! # Sources Crate
//!
//! This crate implements the dataset sources the recommendation pipeline
//! draws its raw restaurant records from.
//!
//! ## Components
//!
//! ### Hub Source
//! Pages through the Hugging Face datasets server and assembles the whole
//! split into a `Dataset`. Owns the HTTP timeout and retry policy.
//!
//! ### Caching Source
//! Fetch-or-cache wrapper: serves from the flat cache file when present,
//! otherwise loads from the wrapped source and writes the cache.
//!
//! ### In-Memory Source
//! Hands back a dataset it was given. Used by tests.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::CacheFile;
//! use sources::{CachingSource, DatasetConfig, DatasetSource, HubSource};
//!
//! let config = DatasetConfig::default();
//! let cache = CacheFile::new(&config.cache_path);
//! let source = CachingSource::new(HubSource::new(config)?, cache);
//!
//! let dataset = source.load()?;
//! println!("{} rows", dataset.len());
//! ```

// Public modules
pub mod cached;
pub mod config;
pub mod hub;
pub mod source;

// Re-export commonly used types
pub use cached::CachingSource;
pub use config::DatasetConfig;
pub use hub::HubSource;
pub use source::{DatasetSource, InMemorySource};

/// Build the default fetch-or-cache source for a configuration.
pub fn default_source(config: &DatasetConfig, use_cache: bool) -> anyhow::Result<CachingSource<HubSource>> {
    let cache = data_loader::CacheFile::new(&config.cache_path);
    let hub = HubSource::new(config.clone())?;
    Ok(CachingSource::new(hub, cache).with_cache(use_cache))
}
