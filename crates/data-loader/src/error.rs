//! Error types for the data-loader crate.
//!
//! Parse failures on individual cells are not errors here: the field
//! normalizer degrades them to absent values. What remains is the
//! structural stuff that can actually go wrong when a dataset is read
//! from or written to disk.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, caching or assembling a dataset
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Cache file could not be found
    #[error("Cache file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Cache file contents were not valid JSON for a dataset
    #[error("Malformed cache file {}: {source}", path.display())]
    MalformedCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Dataset could not be serialized for caching
    #[error("Failed to serialize dataset: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// A row does not have the same number of cells as the header
    #[error("Expected {expected} fields but found {found} in row {row}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        row: usize,
    },

    /// The same column name appears twice in a header
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
