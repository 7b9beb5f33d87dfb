//! Common types shared by the heatmap renderer and CLI.

pub mod color;
pub mod dataset;
pub mod error;
pub mod scale;

pub use color::Color;
pub use dataset::{Dataset, DatasetBounds, TemperatureRecord};
pub use error::{HeatmapError, HeatmapResult};
pub use scale::{LinearScale, ThresholdScale};
