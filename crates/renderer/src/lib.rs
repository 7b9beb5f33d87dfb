//! SVG rendering for the monthly temperature heatmap.
//!
//! Implements:
//! - Linear axes with nice ticks
//! - The year × month heatmap with hover tooltips
//! - Threshold color legends
//! - Page composition (SVG, HTML) and PNG rasterization

pub mod axis;
pub mod format;
pub mod heatmap;
pub mod legend;
pub mod page;
pub mod raster;
pub mod svg;
pub mod tooltip;

pub use format::{format_month, NumberFormat, TickFormat};
pub use heatmap::{Cell, ChartLayout, HeatmapRenderer, Margins};
pub use legend::{render_legend, LegendOptions, LegendScale};
pub use page::{compose_html, compose_svg, OutputFormat};
pub use raster::rasterize_png;
pub use svg::{Element, SvgDocument};
pub use tooltip::{Tooltip, TooltipOptions};
