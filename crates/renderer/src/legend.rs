//! Horizontal color legend.
//!
//! A threshold scale with `n` colors is drawn as `n` equal segments laid out
//! on an index scale over `[-1, n - 1]`, so segment `i` spans
//! `x(i - 1)..x(i)` and threshold `i` sits exactly on the boundary between
//! segments `i` and `i + 1`.

use heatmap_common::{LinearScale, ThresholdScale};
use tracing::debug;

use crate::axis::Axis;
use crate::format::TickFormat;
use crate::svg::{fmt_num, Element, SvgDocument, SVG_NS};

/// The kinds of color scale a legend can be drawn for.
#[derive(Debug, Clone, Copy)]
pub enum LegendScale<'a> {
    Threshold(&'a ThresholdScale),
}

impl<'a> From<&'a ThresholdScale> for LegendScale<'a> {
    fn from(scale: &'a ThresholdScale) -> Self {
        LegendScale::Threshold(scale)
    }
}

/// Legend layout and labelling.
#[derive(Debug, Clone)]
pub struct LegendOptions {
    pub title: Option<String>,
    pub tick_size: f64,
    pub width: f64,
    /// Defaults to `44 + tick_size`.
    pub height: Option<f64>,
    pub margin_top: f64,
    pub margin_right: f64,
    /// Defaults to `16 + tick_size`.
    pub margin_bottom: Option<f64>,
    pub margin_left: f64,
    /// Suggested tick count, defaults to `width / 64`. Threshold legends
    /// label every breakpoint (or `tick_values`) and do not use it.
    pub ticks: Option<usize>,
    pub tick_format: TickFormat,
    /// Indices of the breakpoints to label; all of them when `None`.
    pub tick_values: Option<Vec<usize>>,
    pub id: Option<String>,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            title: None,
            tick_size: 6.0,
            width: 320.0,
            height: None,
            margin_top: 18.0,
            margin_right: 0.0,
            margin_bottom: None,
            margin_left: 0.0,
            ticks: None,
            tick_format: TickFormat::Identity,
            tick_values: None,
            id: Some("legend".to_string()),
        }
    }
}

impl LegendOptions {
    pub fn height(&self) -> f64 {
        self.height.unwrap_or(44.0 + self.tick_size)
    }

    pub fn margin_bottom(&self) -> f64 {
        self.margin_bottom.unwrap_or(16.0 + self.tick_size)
    }

    pub fn ticks(&self) -> usize {
        self.ticks.unwrap_or((self.width / 64.0) as usize)
    }

    fn bar_height(&self) -> f64 {
        self.height() - self.margin_top - self.margin_bottom()
    }
}

/// One colored segment of the legend bar.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendSegment {
    pub x: f64,
    pub width: f64,
    pub color: heatmap_common::Color,
    /// Values covered by this color as `[lower, upper)`; open ends are `None`.
    pub range: (Option<f64>, Option<f64>),
}

impl LegendSegment {
    /// Hover label such as `2.8 to 3.9`, `< 2.8` or `≥ 12.8`.
    pub fn label(&self, format: &TickFormat) -> String {
        match self.range {
            (None, Some(upper)) => format!("< {}", format.format(upper)),
            (Some(lower), None) => format!("≥ {}", format.format(lower)),
            (Some(lower), Some(upper)) => {
                format!("{} to {}", format.format(lower), format.format(upper))
            }
            (None, None) => "all values".to_string(),
        }
    }
}

/// Segment geometry for a threshold scale.
pub fn threshold_segments(scale: &ThresholdScale, options: &LegendOptions) -> Vec<LegendSegment> {
    let x = index_scale(scale, options);
    scale
        .colors()
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let x0 = x.apply(i as f64 - 1.0);
            let x1 = x.apply(i as f64);
            LegendSegment {
                x: x0,
                width: x1 - x0,
                color: *color,
                range: scale.extent(i).unwrap_or((None, None)),
            }
        })
        .collect()
}

fn index_scale(scale: &ThresholdScale, options: &LegendOptions) -> LinearScale {
    let n = scale.colors().len() as f64;
    LinearScale::new(
        (-1.0, n - 1.0),
        (options.margin_left, options.width - options.margin_right),
    )
    .rounded()
}

/// Draws the legend for `scale` as a standalone SVG document.
pub fn render_legend<'a>(scale: impl Into<LegendScale<'a>>, options: &LegendOptions) -> SvgDocument {
    match scale.into() {
        LegendScale::Threshold(scale) => render_threshold_legend(scale, options),
    }
}

fn render_threshold_legend(scale: &ThresholdScale, options: &LegendOptions) -> SvgDocument {
    let width = options.width;
    let height = options.height();
    let margin_bottom = options.margin_bottom();

    let mut root = Element::new("svg")
        .attr("xmlns", SVG_NS)
        .num("width", width)
        .num("height", height)
        .attr("viewBox", format!("0 0 {} {}", fmt_num(width), fmt_num(height)))
        .attr("style", "overflow: visible; display: block");
    if let Some(id) = &options.id {
        root.set_attr("id", id);
    }

    let segments = threshold_segments(scale, options);
    root.push(Element::new("g").children(segments.iter().map(|s| {
        Element::new("rect")
            .num("x", s.x)
            .num("y", options.margin_top)
            .num("width", s.width)
            .num("height", options.bar_height())
            .attr("fill", s.color)
            .child(Element::new("title").text(s.label(&options.tick_format)))
    })));

    let thresholds = scale.thresholds().to_vec();
    let indices: Vec<f64> = match &options.tick_values {
        Some(values) => values
            .iter()
            .filter(|i| **i < thresholds.len())
            .map(|i| *i as f64)
            .collect(),
        None => (0..thresholds.len()).map(|i| i as f64).collect(),
    };

    let label_format = options.tick_format.clone();
    let format = TickFormat::custom(move |i| {
        thresholds
            .get(i as usize)
            .map(|t| label_format.format(*t))
            .unwrap_or_default()
    });

    let mut axis = Axis::bottom(index_scale(scale, options))
        .tick_values(indices)
        .tick_size(options.tick_size)
        .tick_line_start(options.margin_top + margin_bottom - height)
        .domain(false)
        .format(format)
        .render(0.0, height - margin_bottom);

    if let Some(title) = &options.title {
        axis.push(
            Element::new("text")
                .attr("class", "title")
                .num("x", options.margin_left)
                .num("y", options.margin_top + margin_bottom - height - 6.0)
                .attr("fill", "currentColor")
                .attr("text-anchor", "start")
                .attr("font-weight", "bold")
                .text(title.clone()),
        );
    }
    root.push(axis);

    debug!(segments = segments.len(), "Rendered threshold legend");

    SvgDocument {
        root,
        width,
        height,
    }
}
