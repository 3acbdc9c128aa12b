//! Fetch-or-cache wrapper around another source.
//!
//! ## Algorithm
//! 1. If caching is enabled and the cache file exists, read it and stop
//! 2. Otherwise load from the inner source
//! 3. If caching is enabled, write what was loaded to the cache

use crate::source::DatasetSource;
use anyhow::{Context, Result};
use data_loader::{CacheFile, Dataset};
use tracing::{info, warn};

/// Wraps a source with a flat-file cache.
pub struct CachingSource<S> {
    inner: S,
    cache: CacheFile,
    use_cache: bool,
}

impl<S: DatasetSource> CachingSource<S> {
    /// Create a caching source with caching enabled
    pub fn new(inner: S, cache: CacheFile) -> Self {
        Self {
            inner,
            cache,
            use_cache: true,
        }
    }

    /// Turn the cache on or off (default: on). With it off, every load goes
    /// to the inner source and nothing is written.
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn cache(&self) -> &CacheFile {
        &self.cache
    }

    /// Load from the inner source, ignoring any existing cache file.
    ///
    /// The fresh copy still replaces the cache when caching is enabled.
    pub fn load_fresh(&self) -> Result<Dataset> {
        let dataset = self.load_inner()?;
        if self.use_cache {
            self.write_cache(&dataset)?;
        }
        Ok(dataset)
    }

    /// Load from the inner source and replace the cache file.
    ///
    /// Writes the cache even when caching is turned off for `load`.
    pub fn refresh(&self) -> Result<Dataset> {
        let dataset = self.load_inner()?;
        self.write_cache(&dataset)?;
        Ok(dataset)
    }

    /// Remove the cache file. Returns `true` if one was deleted.
    pub fn clear_cache(&self) -> Result<bool> {
        self.cache
            .clear()
            .with_context(|| format!("Failed to remove cache {:?}", self.cache.path()))
    }

    fn load_inner(&self) -> Result<Dataset> {
        self.inner
            .load()
            .with_context(|| format!("Failed to load dataset from {}", self.inner.name()))
    }

    fn write_cache(&self, dataset: &Dataset) -> Result<()> {
        self.cache
            .write(dataset)
            .with_context(|| format!("Failed to write cache {:?}", self.cache.path()))
    }
}

impl<S: DatasetSource> DatasetSource for CachingSource<S> {
    fn name(&self) -> &str {
        "CachingSource"
    }

    fn load(&self) -> Result<Dataset> {
        if self.use_cache && self.cache.exists() {
            match self.cache.read() {
                Ok(dataset) => {
                    info!("Loaded {} rows from cache {:?}", dataset.len(), self.cache.path());
                    return Ok(dataset);
                }
                // a corrupt cache is as good as no cache
                Err(e) => warn!("Ignoring unreadable cache {:?}: {}", self.cache.path(), e),
            }
        } else if self.use_cache {
            info!("No cache at {:?}; loading from {}", self.cache.path(), self.inner.name());
        }

        self.load_fresh()
    }
}
