//! Where the dataset comes from and where it is cached.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for acquiring the raw dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Hub dataset identifier, `owner/name`
    pub name: String,
    /// Dataset config (subset) name on the hub
    pub config: String,
    /// Split to load
    pub split: String,
    /// Rows endpoint of the datasets server
    pub rows_url: String,
    /// Rows requested per page (the server caps this at 100)
    pub page_size: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Attempts per page before giving up
    pub max_attempts: u32,
    /// Local flat cache file
    pub cache_path: PathBuf,
}

impl DatasetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            name: "ManikaSaini/zomato-restaurant-recommendation".to_string(),
            config: "default".to_string(),
            split: "train".to_string(),
            rows_url: "https://datasets-server.huggingface.co/rows".to_string(),
            page_size: 100,
            timeout_secs: 30,
            max_attempts: 3,
            cache_path: PathBuf::from("data/zomato_data.json"),
        }
    }
}
