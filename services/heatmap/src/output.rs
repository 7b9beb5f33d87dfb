//! Renders a dataset into the requested output format and writes it out.

use std::path::Path;

use heatmap_common::{Color, Dataset, HeatmapError, HeatmapResult};
use renderer::{
    compose_html, compose_svg, rasterize_png, render_legend, HeatmapRenderer, OutputFormat,
};
use tracing::{debug, info, instrument};

use crate::config::ChartConfig;

/// The explicit format wins, then the file extension, then SVG.
pub fn resolve_format(explicit: Option<OutputFormat>, path: &Path) -> OutputFormat {
    explicit
        .or_else(|| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(OutputFormat::from_extension)
        })
        .unwrap_or_default()
}

/// Render the chart and legend with one shared color scale and compose them.
///
/// `png_scale` only applies to [`OutputFormat::Png`].
#[instrument(skip(dataset, config), fields(records = dataset.len()))]
pub fn render_output(
    dataset: &Dataset,
    config: &ChartConfig,
    format: OutputFormat,
    png_scale: f32,
) -> HeatmapResult<Vec<u8>> {
    let scale = config.scale();
    let chart = HeatmapRenderer::new(config.chart.clone(), &scale).render(dataset);
    let legend = render_legend(&scale, &config.legend.options()?);
    let legend_x = config.chart.margins.left;

    let bytes = match format {
        OutputFormat::Svg => compose_svg(&chart, &legend, legend_x).markup().into_bytes(),
        OutputFormat::Html => {
            compose_html(&config.chart.title, &chart, &legend, &config.tooltip)?.into_bytes()
        }
        OutputFormat::Png => {
            let markup = compose_svg(&chart, &legend, legend_x).markup();
            rasterize_png(&markup, png_scale, Color::rgb(255, 255, 255))?
        }
    };

    debug!(bytes = bytes.len(), "Rendered output");
    Ok(bytes)
}

/// Write `bytes` to `path`, creating missing parent directories.
pub async fn write_output(path: &Path, bytes: &[u8]) -> HeatmapResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            HeatmapError::Io(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| HeatmapError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), bytes = bytes.len(), "Wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_format() {
        let png = PathBuf::from("out/chart.PNG");
        assert_eq!(resolve_format(None, &png), OutputFormat::Png);
        assert_eq!(resolve_format(Some(OutputFormat::Html), &png), OutputFormat::Html);
        assert_eq!(resolve_format(None, Path::new("chart.html")), OutputFormat::Html);
        assert_eq!(resolve_format(None, Path::new("chart")), OutputFormat::Svg);
        assert_eq!(resolve_format(None, Path::new("chart.gif")), OutputFormat::Svg);
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/chart.svg");
        write_output(&path, b"<svg/>").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"<svg/>");
    }
}
