//! Fetches the temperature dataset.
//!
//! One attempt per run: a failed request or an unparseable body is returned
//! as an error and nothing is retried.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use heatmap_common::{Dataset, HeatmapError, HeatmapResult};
use reqwest::Client;
use tracing::{debug, info, instrument};

/// Published global land-surface temperature dataset.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Where the dataset document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATA_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads datasets over HTTP or from disk.
pub struct DataLoader {
    client: Client,
}

impl DataLoader {
    /// Create a loader. Requests never time out unless `timeout` is set.
    pub fn new(timeout: Option<Duration>) -> HeatmapResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| HeatmapError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    #[instrument(skip(self), fields(source = %source))]
    pub async fn load(&self, source: &DataSource) -> HeatmapResult<Dataset> {
        let body = match source {
            DataSource::Url(url) => self.fetch(url).await?,
            DataSource::File(path) => tokio::fs::read(path).await.map_err(|e| {
                HeatmapError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?,
        };
        debug!(bytes = body.len(), "Read dataset document");

        let dataset = Dataset::from_json_slice(&body)?;
        info!(
            records = dataset.len(),
            base_temperature = dataset.base_temperature,
            "Loaded dataset"
        );
        Ok(dataset)
    }

    async fn fetch(&self, url: &str) -> HeatmapResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HeatmapError::Fetch(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HeatmapError::Fetch(format!("GET {} returned {}", url, status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HeatmapError::Fetch(format!("Failed to read response body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}
