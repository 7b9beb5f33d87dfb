//! Axis rendering for linear scales.
//!
//! Produces the usual chart axis layout: an optional domain path, one
//! `g.tick` per tick value containing a tick line and a label.

use heatmap_common::LinearScale;

use crate::format::TickFormat;
use crate::svg::{fmt_num, Element};

/// Which side of the plot the axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

/// Axis configuration for one linear scale.
#[derive(Debug, Clone)]
pub struct Axis {
    orient: AxisOrient,
    scale: LinearScale,
    tick_count: usize,
    tick_values: Option<Vec<f64>>,
    tick_size_inner: f64,
    tick_size_outer: f64,
    tick_padding: f64,
    tick_line_start: f64,
    show_domain: bool,
    format: TickFormat,
    id: Option<String>,
}

impl Axis {
    pub fn new(orient: AxisOrient, scale: LinearScale) -> Self {
        Self {
            orient,
            scale,
            tick_count: 10,
            tick_values: None,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            tick_line_start: 0.0,
            show_domain: true,
            format: TickFormat::Identity,
            id: None,
        }
    }

    pub fn bottom(scale: LinearScale) -> Self {
        Self::new(AxisOrient::Bottom, scale)
    }

    pub fn left(scale: LinearScale) -> Self {
        Self::new(AxisOrient::Left, scale)
    }

    pub fn ticks(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    pub fn tick_values(mut self, values: Vec<f64>) -> Self {
        self.tick_values = Some(values);
        self
    }

    /// Sets both the inner and outer tick size.
    pub fn tick_size(mut self, size: f64) -> Self {
        self.tick_size_inner = size;
        self.tick_size_outer = size;
        self
    }

    /// Where tick lines start, measured along the tick direction. Negative
    /// values extend the line back across the plot (e.g. through a legend bar).
    pub fn tick_line_start(mut self, start: f64) -> Self {
        self.tick_line_start = start;
        self
    }

    pub fn domain(mut self, show: bool) -> Self {
        self.show_domain = show;
        self
    }

    pub fn format(mut self, format: TickFormat) -> Self {
        self.format = format;
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Tick values in data space, explicit values taking precedence.
    pub fn values(&self) -> Vec<f64> {
        match &self.tick_values {
            Some(values) => values.clone(),
            None => self.scale.ticks(self.tick_count),
        }
    }

    /// `(value, pixel position, label)` for every tick.
    pub fn layout(&self) -> Vec<(f64, f64, String)> {
        self.values()
            .into_iter()
            .map(|v| (v, self.scale.apply(v), self.format.format(v)))
            .collect()
    }

    /// Renders the axis as a group positioned at `(x, y)`.
    pub fn render(&self, x: f64, y: f64) -> Element {
        let (text_anchor, k) = match self.orient {
            AxisOrient::Bottom => ("middle", 1.0),
            AxisOrient::Left => ("end", -1.0),
        };

        let mut group = Element::new("g");
        if let Some(id) = &self.id {
            group.set_attr("id", id);
        }
        group.set_attr("transform", format!("translate({},{})", fmt_num(x), fmt_num(y)));
        group.set_attr("fill", "none");
        group.set_attr("font-size", 10);
        group.set_attr("font-family", "sans-serif");
        group.set_attr("text-anchor", text_anchor);

        if self.show_domain {
            let (r0, r1) = self.scale.range();
            let outer = k * self.tick_size_outer;
            let d = match self.orient {
                AxisOrient::Bottom => format!(
                    "M{},{}V0H{}V{}",
                    fmt_num(r0),
                    fmt_num(outer),
                    fmt_num(r1),
                    fmt_num(outer)
                ),
                AxisOrient::Left => format!(
                    "M{},{}H0V{}H{}",
                    fmt_num(outer),
                    fmt_num(r0),
                    fmt_num(r1),
                    fmt_num(outer)
                ),
            };
            group.push(
                Element::new("path")
                    .attr("class", "domain")
                    .attr("stroke", "currentColor")
                    .attr("d", d),
            );
        }

        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        for (_, pos, label) in self.layout() {
            let tick = match self.orient {
                AxisOrient::Bottom => Element::new("g")
                    .attr("class", "tick")
                    .attr("transform", format!("translate({},0)", fmt_num(pos)))
                    .child(
                        Element::new("line")
                            .attr("stroke", "currentColor")
                            .num("y1", self.tick_line_start)
                            .num("y2", self.tick_size_inner),
                    )
                    .child(
                        Element::new("text")
                            .attr("fill", "currentColor")
                            .num("y", spacing)
                            .attr("dy", "0.71em")
                            .text(label),
                    ),
                AxisOrient::Left => Element::new("g")
                    .attr("class", "tick")
                    .attr("transform", format!("translate(0,{})", fmt_num(pos)))
                    .child(
                        Element::new("line")
                            .attr("stroke", "currentColor")
                            .num("x1", -self.tick_line_start)
                            .num("x2", -self.tick_size_inner),
                    )
                    .child(
                        Element::new("text")
                            .attr("fill", "currentColor")
                            .num("x", -spacing)
                            .attr("dy", "0.32em")
                            .text(label),
                    ),
            };
            group.push(tick);
        }

        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::month_tick_label;

    #[test]
    fn test_year_axis_ticks() {
        let x = LinearScale::new((1753.0, 2016.0), (0.0, 1200.0));
        let axis = Axis::bottom(x).format(TickFormat::spec("d").unwrap());
        let values = axis.values();
        assert_eq!(values.first(), Some(&1760.0));
        assert_eq!(values.last(), Some(&2000.0));
        assert!(values.windows(2).all(|w| w[1] - w[0] == 20.0));
        assert_eq!(axis.layout()[0].2, "1760");
    }

    #[test]
    fn test_month_axis_labels() {
        let y = LinearScale::new((0.5, 12.5), (0.0, 400.0));
        let axis = Axis::left(y).format(TickFormat::custom(month_tick_label));
        let labels: Vec<String> = axis.layout().into_iter().map(|t| t.2).collect();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "January");
        assert_eq!(labels[11], "December");
    }

    #[test]
    fn test_render_structure() {
        let x = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let el = Axis::bottom(x)
            .tick_values(vec![0.0, 5.0])
            .domain(false)
            .id("x-axis")
            .render(0.0, 50.0);
        assert_eq!(el.get_attr("id"), Some("x-axis"));
        assert_eq!(el.get_attr("transform"), Some("translate(0,50)"));
        let ticks = el.find_all(&|e| e.get_attr("class") == Some("tick"));
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[1].get_attr("transform"), Some("translate(50,0)"));
        assert!(el.find_all(&|e| e.get_attr("class") == Some("domain")).is_empty());
    }
}
