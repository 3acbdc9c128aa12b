//! Configuration for the `plate-recs` binary.
//!
//! Defaults cover the public Zomato dataset; a TOML file can override any
//! subset of fields:
//!
//! ```toml
//! top_n = 5
//!
//! [dataset]
//! cache_path = "/tmp/zomato.json"
//!
//! [columns]
//! city = "location"
//! ```

use anyhow::{Context, Result};
use data_loader::ColumnConfig;
use serde::Deserialize;
use sources::DatasetConfig;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub dataset: DatasetConfig,
    pub columns: ColumnConfig,
    /// Maximum candidates printed by `recommend`
    pub top_n: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            columns: ColumnConfig::default(),
            top_n: 10,
        }
    }
}

impl RecommenderConfig {
    /// Read a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// The file's config if a path is given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::load(None).unwrap();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.columns.city, "listed_in(city)");
        assert_eq!(config.dataset.cache_path, PathBuf::from("data/zomato_data.json"));
    }

    #[test]
    fn test_partial_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plate-recs.toml");
        fs::write(
            &path,
            "top_n = 3\n\n[dataset]\ncache_path = \"/tmp/z.json\"\n\n[columns]\ncity = \"location\"\n",
        )
        .unwrap();

        let config = RecommenderConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.dataset.cache_path, PathBuf::from("/tmp/z.json"));
        assert_eq!(config.dataset.split, "train");
        assert_eq!(config.columns.city, "location");
        assert_eq!(config.columns.rating, "rate");
    }

    #[test]
    fn test_missing_or_invalid_file() {
        let dir = tempdir().unwrap();
        assert!(RecommenderConfig::load(Some(dir.path().join("nope.toml").as_path())).is_err());

        let path = dir.path().join("bad.toml");
        fs::write(&path, "top_n = \"many\"").unwrap();
        assert!(RecommenderConfig::load(Some(path.as_path())).is_err());
    }
}
