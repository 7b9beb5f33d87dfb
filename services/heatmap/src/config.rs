//! Chart configuration loaded from YAML.
//!
//! Every section is optional, so an empty file yields the stock chart:
//!
//! ```yaml
//! chart:
//!   width: 1200
//!   height: 400
//!   margins: { top: 70, right: 30, bottom: 50, left: 100 }
//!   no_data_color: "#d3d3d3"
//! tooltip:
//!   offset_x: -80
//!   offset_y: -240
//! legend:
//!   title: "Temperature (°C)"
//!   width: 320
//!   tick_size: 0
//!   tick_format: ".1f"
//! palette:
//!   thresholds: [2.8, 3.9, 5.0]
//!   colors: ["#4575b4", "#e0f3f8", "#fee090", "#d73027"]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use heatmap_common::{HeatmapError, HeatmapResult, ThresholdScale};
use renderer::{ChartLayout, LegendOptions, TickFormat, TooltipOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Root of the chart configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub chart: ChartLayout,
    pub tooltip: TooltipOptions,
    pub legend: LegendConfig,
    /// Replaces the built-in temperature palette. Validated on load.
    pub palette: Option<ThresholdScale>,
}

/// Legend settings exposed in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub title: Option<String>,
    pub width: f64,
    pub tick_size: f64,
    pub tick_format: String,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            title: Some("Temperature (°C)".to_string()),
            width: 320.0,
            tick_size: 0.0,
            tick_format: ".1f".to_string(),
        }
    }
}

impl LegendConfig {
    pub fn options(&self) -> HeatmapResult<LegendOptions> {
        let tick_format = TickFormat::spec(&self.tick_format).map_err(|e| {
            HeatmapError::Config(format!("legend.tick_format: {}", e))
        })?;
        Ok(LegendOptions {
            title: self.title.clone(),
            tick_size: self.tick_size,
            width: self.width,
            tick_format,
            ..LegendOptions::default()
        })
    }
}

impl ChartConfig {
    /// Load a chart configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), custom_palette = config.palette.is_some(), "Loaded chart config");
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> HeatmapResult<Self> {
        // serde_yaml rejects an empty document as a map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| HeatmapError::Config(e.to_string()))?;
        config.legend.options()?;
        Ok(config)
    }

    /// The color scale shared by the chart and the legend.
    pub fn scale(&self) -> ThresholdScale {
        self.palette.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_common::Color;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ChartConfig::from_yaml("").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.chart.width, 1200.0);
        assert_eq!(config.tooltip.offset_y, -240.0);
        assert_eq!(config.scale(), ThresholdScale::temperature());

        let options = config.legend.options().unwrap();
        assert_eq!(options.title.as_deref(), Some("Temperature (°C)"));
        assert_eq!(options.tick_size, 0.0);
        assert_eq!(options.tick_format.format(5.0), "5.0");
    }

    #[test]
    fn test_partial_config() {
        let yaml = r##"
chart:
  width: 800
  margins:
    left: 120
  no_data_color: "#000000"
tooltip:
  offset_x: 10
legend:
  title: null
  tick_format: ".2f"
"##;
        let config = ChartConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.chart.width, 800.0);
        assert_eq!(config.chart.height, 400.0);
        assert_eq!(config.chart.margins.left, 120.0);
        assert_eq!(config.chart.margins.top, 70.0);
        assert_eq!(config.chart.no_data_color, Color::rgb(0, 0, 0));
        assert_eq!(config.tooltip.offset_x, 10.0);
        assert_eq!(config.tooltip.offset_y, -240.0);
        assert_eq!(config.legend.title, None);
        assert_eq!(config.legend.options().unwrap().tick_format.format(2.8), "2.80");
    }

    #[test]
    fn test_custom_palette() {
        let yaml = r##"
palette:
  thresholds: [0.0, 10.0]
  colors: ["#0000ff", "#ffffff", "#ff0000"]
"##;
        let scale = ChartConfig::from_yaml(yaml).unwrap().scale();
        assert_eq!(scale.thresholds(), &[0.0, 10.0]);
        assert_eq!(scale.color_for(10.0), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_invalid_palette_rejected() {
        let yaml = r##"
palette:
  thresholds: [10.0, 0.0]
  colors: ["#0000ff", "#ffffff", "#ff0000"]
"##;
        assert!(ChartConfig::from_yaml(yaml).is_err());

        let mismatched = r##"
palette:
  thresholds: [1.0]
  colors: ["#0000ff"]
"##;
        assert!(ChartConfig::from_yaml(mismatched).is_err());
    }

    #[test]
    fn test_invalid_tick_format_rejected() {
        let err = ChartConfig::from_yaml("legend:\n  tick_format: \"??\"\n").unwrap_err();
        assert!(matches!(err, HeatmapError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.yaml");
        std::fs::write(&path, "chart:\n  title: Custom\n").unwrap();

        let config = ChartConfig::load(&path).unwrap();
        assert_eq!(config.chart.title, "Custom");

        assert!(ChartConfig::load(&dir.path().join("missing.yaml")).is_err());
    }
}
