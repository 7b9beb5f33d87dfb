//! Year × month heatmap of monthly temperatures.
//!
//! Every record becomes one `rect.cell`: the x position comes from a linear
//! year scale over `[min_year, max_year + 1)`, the y position from a linear
//! month scale over `[min_month - 0.5, max_month + 0.5)`, and the fill from a
//! [`ThresholdScale`] applied to `base_temperature + variance`.

use heatmap_common::{Color, Dataset, DatasetBounds, LinearScale, TemperatureRecord, ThresholdScale};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::axis::Axis;
use crate::format::{month_tick_label, TickFormat};
use crate::svg::{fmt_num, Element, SvgDocument, SVG_NS};
use crate::tooltip::Tooltip;

/// Space around the plot area for titles and axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 70.0,
            right: 30.0,
            bottom: 50.0,
            left: 100.0,
        }
    }
}

/// Chart dimensions and decoration. `width`/`height` are the plot area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub title: String,
    /// Fill for cells whose temperature cannot be classified.
    pub no_data_color: Color,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 400.0,
            margins: Margins::default(),
            x_ticks: 10,
            y_ticks: 10,
            title: "Monthly Global Land-Surface Temperature".to_string(),
            no_data_color: Color::rgb(211, 211, 211),
        }
    }
}

impl ChartLayout {
    pub fn outer_width(&self) -> f64 {
        self.margins.left + self.width + self.margins.right
    }

    pub fn outer_height(&self) -> f64 {
        self.margins.top + self.height + self.margins.bottom
    }
}

/// Screen geometry for one record, relative to the plot origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub record: TemperatureRecord,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub temperature: f64,
    pub fill: Color,
}

/// Renders datasets onto a fixed layout with a shared color scale.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer<'a> {
    layout: ChartLayout,
    scale: &'a ThresholdScale,
}

impl<'a> HeatmapRenderer<'a> {
    pub fn new(layout: ChartLayout, scale: &'a ThresholdScale) -> Self {
        Self { layout, scale }
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    /// Year and month scales mapping onto the plot area.
    pub fn scales(&self, bounds: &DatasetBounds) -> (LinearScale, LinearScale) {
        let x = LinearScale::new(bounds.x_domain(), (0.0, self.layout.width));
        let y = LinearScale::new(bounds.y_domain(), (0.0, self.layout.height));
        (x, y)
    }

    pub fn cells(&self, dataset: &Dataset) -> Vec<Cell> {
        let Some(bounds) = dataset.bounds() else {
            return Vec::new();
        };
        let (x, y) = self.scales(&bounds);
        let width = self.layout.width / bounds.year_span();
        let height = self.layout.height / bounds.max_month_bound();

        dataset
            .records
            .iter()
            .map(|record| {
                let temperature = record.temperature(dataset.base_temperature);
                Cell {
                    record: *record,
                    x: x.apply(record.year as f64),
                    y: y.apply(record.month as f64 - 0.5),
                    width,
                    height,
                    temperature,
                    fill: self
                        .scale
                        .color_for(temperature)
                        .unwrap_or(self.layout.no_data_color),
                }
            })
            .collect()
    }

    #[instrument(skip_all, fields(records = dataset.len()))]
    pub fn render(&self, dataset: &Dataset) -> SvgDocument {
        let layout = &self.layout;
        let mut root = Element::new("svg")
            .attr("xmlns", SVG_NS)
            .attr("class", "heatmap")
            .num("width", layout.outer_width())
            .num("height", layout.outer_height())
            .attr(
                "viewBox",
                format!(
                    "0 0 {} {}",
                    fmt_num(layout.outer_width()),
                    fmt_num(layout.outer_height())
                ),
            )
            .child(self.title());

        let Some(bounds) = dataset.bounds() else {
            warn!("Dataset has no records, rendering empty chart");
            root.push(self.description("No data"));
            root.push(self.empty_state());
            return self.document(root);
        };

        root.push(self.description(&format!(
            "{} - {}: base temperature {}°C",
            bounds.min_year, bounds.max_year, dataset.base_temperature
        )));

        let cells = self.cells(dataset);
        debug!(cells = cells.len(), "Laid out heatmap cells");

        let cell_group = Element::new("g")
            .attr("id", "cells")
            .attr(
                "transform",
                format!(
                    "translate({},{})",
                    fmt_num(layout.margins.left),
                    fmt_num(layout.margins.top)
                ),
            )
            .children(
                cells
                    .iter()
                    .map(|cell| cell_element(cell, dataset.base_temperature)),
            );
        root.push(cell_group);

        let (x, y) = self.scales(&bounds);
        root.push(
            Axis::bottom(x)
                .ticks(layout.x_ticks)
                .format(TickFormat::spec("d").unwrap_or_default())
                .id("x-axis")
                .render(layout.margins.left, layout.margins.top + layout.height),
        );
        root.push(
            Axis::left(y)
                .ticks(layout.y_ticks)
                .format(TickFormat::custom(month_tick_label))
                .id("y-axis")
                .render(layout.margins.left, layout.margins.top),
        );
        root.push(self.axis_labels());

        self.document(root)
    }

    fn document(&self, root: Element) -> SvgDocument {
        SvgDocument {
            root,
            width: self.layout.outer_width(),
            height: self.layout.outer_height(),
        }
    }

    fn title(&self) -> Element {
        Element::new("text")
            .attr("id", "title")
            .num("x", self.layout.outer_width() / 2.0)
            .num("y", 28.0)
            .attr("text-anchor", "middle")
            .attr("font-family", "sans-serif")
            .attr("font-size", 20)
            .text(self.layout.title.clone())
    }

    fn description(&self, text: &str) -> Element {
        Element::new("text")
            .attr("id", "description")
            .num("x", self.layout.outer_width() / 2.0)
            .num("y", 52.0)
            .attr("text-anchor", "middle")
            .attr("font-family", "sans-serif")
            .attr("font-size", 14)
            .text(text)
    }

    fn axis_labels(&self) -> Element {
        let m = &self.layout.margins;
        let month_x = m.left - 75.0;
        let month_y = m.top + self.layout.height / 2.0;
        Element::new("g")
            .attr("font-family", "sans-serif")
            .attr("font-size", 12)
            .attr("text-anchor", "middle")
            .child(
                Element::new("text")
                    .num("x", m.left + self.layout.width / 2.0)
                    .num("y", m.top + self.layout.height + 40.0)
                    .text("Years"),
            )
            .child(
                Element::new("text")
                    .attr(
                        "transform",
                        format!(
                            "translate({},{}) rotate(-90)",
                            fmt_num(month_x),
                            fmt_num(month_y)
                        ),
                    )
                    .text("Months"),
            )
    }

    fn empty_state(&self) -> Element {
        let m = &self.layout.margins;
        Element::new("g")
            .attr("id", "empty-state")
            .attr("transform", format!("translate({},{})", fmt_num(m.left), fmt_num(m.top)))
            .child(
                Element::new("rect")
                    .num("width", self.layout.width)
                    .num("height", self.layout.height)
                    .attr("fill", "none")
                    .attr("stroke", self.layout.no_data_color),
            )
            .child(
                Element::new("text")
                    .num("x", self.layout.width / 2.0)
                    .num("y", self.layout.height / 2.0)
                    .attr("text-anchor", "middle")
                    .attr("font-family", "sans-serif")
                    .attr("font-size", 16)
                    .text("No data"),
            )
    }
}

fn cell_element(cell: &Cell, base_temperature: f64) -> Element {
    let tooltip = Tooltip::for_record(&cell.record, base_temperature);
    Element::new("rect")
        .attr("class", "cell")
        .num("x", cell.x)
        .num("y", cell.y)
        .num("width", cell.width)
        .num("height", cell.height)
        .attr("fill", cell.fill)
        .attr("data-year", cell.record.year)
        .attr("data-month", cell.record.month.saturating_sub(1))
        .attr("data-temp", cell.temperature)
        .child(Element::new("title").text(tooltip.text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            8.0,
            vec![
                TemperatureRecord::new(2000, 1, -1.0),
                TemperatureRecord::new(2001, 12, 6.0),
                TemperatureRecord::new(2002, 6, f64::NAN),
            ],
        )
    }

    #[test]
    fn test_cell_geometry() {
        let scale = ThresholdScale::temperature();
        let renderer = HeatmapRenderer::new(ChartLayout::default(), &scale);
        let cells = renderer.cells(&dataset());

        // 3 years across 1200px, 12.5 month units down 400px
        assert_eq!(cells[0].width, 400.0);
        assert_eq!(cells[0].height, 32.0);
        assert_eq!(cells[0].x, 0.0);
        assert_eq!(cells[1].x, 400.0);
        assert_eq!(cells[0].y, 0.0);
        assert_eq!(cells[1].y, 11.0 / 12.0 * 400.0);
    }

    #[test]
    fn test_cell_fill() {
        let scale = ThresholdScale::temperature();
        let layout = ChartLayout::default();
        let no_data = layout.no_data_color;
        let renderer = HeatmapRenderer::new(layout, &scale);
        let cells = renderer.cells(&dataset());

        // 7.0 falls in [6.1, 7.2)
        assert_eq!(cells[0].temperature, 7.0);
        assert_eq!(cells[0].fill, scale.colors()[4]);
        // 14.0 is above the last breakpoint
        assert_eq!(cells[1].fill, scale.colors()[10]);
        assert_eq!(cells[2].fill, no_data);
    }

    #[test]
    fn test_data_temp_keeps_full_precision() {
        let scale = ThresholdScale::temperature();
        let renderer = HeatmapRenderer::new(ChartLayout::default(), &scale);
        let dataset = Dataset::new(8.66, vec![TemperatureRecord::new(1753, 4, -0.8434)]);
        let doc = renderer.render(&dataset);

        let cells = doc.root.find_all(&|e| e.get_attr("class") == Some("cell"));
        let expected = (8.66_f64 + -0.8434).to_string();
        assert_eq!(cells[0].get_attr("data-temp"), Some(expected.as_str()));
        assert!(expected.len() > "7.817".len());
    }

    #[test]
    fn test_outer_size() {
        let layout = ChartLayout::default();
        assert_eq!(layout.outer_width(), 1330.0);
        assert_eq!(layout.outer_height(), 520.0);
    }
}
