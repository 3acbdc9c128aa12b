//! The `DatasetSource` trait and a trivial in-memory implementation.

use anyhow::Result;
use data_loader::Dataset;

/// Anything that can hand the pipeline a raw dataset.
///
/// Called once per pipeline run. Implementations own every decision about
/// network access, caching, timeouts and retries; the core never sees them.
pub trait DatasetSource {
    /// Returns the name of this source (for logging)
    fn name(&self) -> &str;

    /// Produce the raw dataset.
    fn load(&self) -> Result<Dataset>;
}

/// Serves a dataset that is already in memory.
///
/// Mostly useful for tests and for callers that assembled a dataset
/// themselves.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    dataset: Dataset,
}

impl InMemorySource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for InMemorySource {
    fn name(&self) -> &str {
        "InMemorySource"
    }

    fn load(&self) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }
}

impl<S: DatasetSource + ?Sized> DatasetSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> Result<Dataset> {
        (**self).load()
    }
}

impl<S: DatasetSource + ?Sized> DatasetSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> Result<Dataset> {
        (**self).load()
    }
}
