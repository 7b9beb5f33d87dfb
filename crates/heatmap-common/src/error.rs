//! Error types for the heatmap crates.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for loading and rendering.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Load Errors ===
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),

    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),

    // === Style Errors ===
    #[error("Invalid color scale: {0}")]
    InvalidScale(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid format specifier: {0}")]
    InvalidFormat(String),

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HeatmapError {
    /// Whether this error happened while obtaining the dataset.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            HeatmapError::Fetch(_) | HeatmapError::Parse(_) | HeatmapError::Io(_)
        )
    }
}

impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::Parse(format!("JSON error: {}", err))
    }
}
