//! Hub Source - fetch the raw dataset from the Hugging Face datasets server
//!
//! The rows endpoint serves a split in pages of at most 100 rows:
//!
//! ```text
//! GET {rows_url}?dataset=<name>&config=<config>&split=<split>&offset=<n>&length=<k>
//! ```
//!
//! Each page carries the feature (column) list, the rows as JSON objects and
//! the total row count, so paging stops once `offset` reaches the total.
//! JSON cells are flattened to text here; numeric interpretation is the
//! preprocessor's job.

use crate::config::DatasetConfig;
use crate::source::DatasetSource;
use anyhow::{Context, Result, bail};
use data_loader::{Dataset, RawRecord};
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// One page of the rows endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct RowsPage {
    features: Vec<Feature>,
    rows: Vec<RowEntry>,
    num_rows_total: usize,
}

#[derive(Debug, Deserialize)]
struct Feature {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    row: Map<String, Value>,
}

impl RowsPage {
    fn columns(&self) -> Vec<String> {
        self.features.iter().map(|f| f.name.clone()).collect()
    }

    fn into_records(self, columns: &[String]) -> impl Iterator<Item = RawRecord> + '_ {
        self.rows.into_iter().map(move |entry| {
            columns
                .iter()
                .map(|column| entry.row.get(column).and_then(cell_text))
                .collect()
        })
    }
}

/// Flatten a JSON cell to text. `null` stays absent.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Fetches a whole dataset split over HTTP.
pub struct HubSource {
    config: DatasetConfig,
    http: HttpClient,
    retry_delay: Duration,
}

impl HubSource {
    /// Create a new hub source
    pub fn new(config: DatasetConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Configure the base delay between retries (default: 500ms, doubled per attempt)
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn fetch_page(&self, offset: usize) -> Result<RowsPage> {
        let attempts = self.config.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.retry_delay * 2u32.saturating_pow(attempt - 1);
                thread::sleep(delay);
            }
            match self.request_page(offset) {
                Ok(page) => return Ok(page),
                Err(e) => {
                    warn!(
                        "Fetching rows at offset {} failed (attempt {}/{}): {:#}",
                        offset,
                        attempt + 1,
                        attempts,
                        e
                    );
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no attempts made")))
            .with_context(|| format!("Giving up on rows at offset {}", offset))
    }

    fn request_page(&self, offset: usize) -> Result<RowsPage> {
        let offset = offset.to_string();
        let length = self.config.page_size.to_string();
        let response = self
            .http
            .get(&self.config.rows_url)
            .query(&[
                ("dataset", self.config.name.as_str()),
                ("config", self.config.config.as_str()),
                ("split", self.config.split.as_str()),
                ("offset", offset.as_str()),
                ("length", length.as_str()),
            ])
            .send()
            .with_context(|| format!("Failed to reach {}", self.config.rows_url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            bail!("Datasets server returned {}: {}", status, body);
        }

        response
            .json::<RowsPage>()
            .context("Failed to parse rows response")
    }
}

impl DatasetSource for HubSource {
    fn name(&self) -> &str {
        "HubSource"
    }

    #[instrument(skip(self), fields(dataset = %self.config.name, split = %self.config.split))]
    fn load(&self) -> Result<Dataset> {
        info!("Fetching dataset from hub");

        let first = self.fetch_page(0)?;
        let total = first.num_rows_total;
        let columns = first.columns();
        let mut dataset = Dataset::new(columns.clone()).context("Hub returned an invalid header")?;

        let mut offset = 0;
        let mut page = Some(first);
        while let Some(current) = page.take() {
            let fetched = current.rows.len();
            for record in current.into_records(&columns) {
                dataset.push(record)?;
            }
            offset += fetched;
            debug!("Fetched {}/{} rows", offset, total);

            if fetched > 0 && offset < total {
                page = Some(self.fetch_page(offset)?);
            }
        }

        if dataset.len() < total {
            warn!("Hub reported {} rows but served {}", total, dataset.len());
        }
        info!("Fetched {} rows from hub", dataset.len());
        Ok(dataset)
    }
}
