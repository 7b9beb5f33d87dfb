//! Global monthly temperature heatmap generator.
//!
//! Loads the temperature-variance dataset from a URL or a local file,
//! renders the heatmap and its legend with one shared color scale, and
//! writes the composed result as SVG, HTML or PNG.

pub mod config;
pub mod loader;
pub mod output;

pub use config::{ChartConfig, LegendConfig};
pub use loader::{DataLoader, DataSource, DEFAULT_DATA_URL};
pub use output::{render_output, resolve_format, write_output};
