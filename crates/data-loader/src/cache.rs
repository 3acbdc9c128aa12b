//! Flat-file cache for a raw dataset.
//!
//! The cache is a single JSON document holding the header and the rows. It
//! is opaque to the rest of the pipeline: whatever goes in comes back out
//! unchanged, and it is re-validated on the way in.

use crate::error::{DataLoadError, Result};
use crate::types::Dataset;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Handle on the cache file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the cached dataset.
    pub fn read(&self) -> Result<Dataset> {
        if !self.exists() {
            return Err(DataLoadError::FileNotFound {
                path: self.path.clone(),
            });
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let dataset: Dataset =
            serde_json::from_reader(reader).map_err(|source| DataLoadError::MalformedCache {
                path: self.path.clone(),
                source,
            })?;
        dataset.validate()?;

        debug!("Read {} rows from cache {:?}", dataset.len(), self.path);
        Ok(dataset)
    }

    /// Write the dataset to the cache, creating parent directories as needed.
    ///
    /// Writes to a sibling temp file first and renames it into place, so an
    /// interrupted write never leaves a truncated cache behind.
    pub fn write(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let written = write_json(&tmp_path, dataset)
            .and_then(|()| fs::rename(&tmp_path, &self.path).map_err(DataLoadError::from));
        if let Err(e) = written {
            // the temp file may never have been created
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        info!("Cached {} rows at {:?}", dataset.len(), self.path);
        Ok(())
    }

    /// Remove the cache file. Returns `true` if a file was deleted.
    pub fn clear(&self) -> Result<bool> {
        if !self.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        info!("Removed cache {:?}", self.path);
        Ok(true)
    }
}

fn write_json(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, dataset)?;
    writer.flush()?;
    Ok(())
}
