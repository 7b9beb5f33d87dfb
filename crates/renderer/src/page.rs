//! Assembles chart and legend into a single output document.

use heatmap_common::{HeatmapError, HeatmapResult};
use serde::{Deserialize, Serialize};

use crate::svg::{escape_text, fmt_num, Element, SvgDocument, SVG_NS};
use crate::tooltip::TooltipOptions;

/// Vertical gap between the chart and the legend.
const LEGEND_GAP: f64 = 20.0;

/// Output artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Html,
    Png,
}

impl OutputFormat {
    /// Infer from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "svg" => Some(OutputFormat::Svg),
            "html" | "htm" => Some(OutputFormat::Html),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Html => "html",
            OutputFormat::Png => "png",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::from_extension(s)
            .ok_or_else(|| HeatmapError::Config(format!("unknown output format: {}", s)))
    }
}

/// Stacks the legend under the chart, aligned with `legend_x`.
pub fn compose_svg(chart: &SvgDocument, legend: &SvgDocument, legend_x: f64) -> SvgDocument {
    let width = chart.width.max(legend_x + legend.width);
    let height = chart.height + LEGEND_GAP + legend.height;
    let root = Element::new("svg")
        .attr("xmlns", SVG_NS)
        .num("width", width)
        .num("height", height)
        .attr("viewBox", format!("0 0 {} {}", fmt_num(width), fmt_num(height)))
        .child(
            Element::new("rect")
                .attr("width", "100%")
                .attr("height", "100%")
                .attr("fill", "white"),
        )
        .child(chart.root.clone())
        .child(
            Element::new("g")
                .attr(
                    "transform",
                    format!(
                        "translate({},{})",
                        fmt_num(legend_x),
                        fmt_num(chart.height + LEGEND_GAP)
                    ),
                )
                .child(legend.root.clone()),
        );
    SvgDocument {
        root,
        width,
        height,
    }
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em; }
.chart { position: relative; display: inline-block; }
.cell:hover { stroke: black; stroke-width: 1; }
#legend { margin-top: 20px; }
#tooltip {
  position: absolute;
  visibility: hidden;
  opacity: 0;
  pointer-events: none;
  padding: 6px 10px;
  border-radius: 4px;
  background: rgba(0, 0, 0, 0.8);
  color: white;
  font-size: 12px;
  line-height: 1.4;
  text-align: center;
  transition: opacity 0.1s;
}
#tooltip.show { visibility: visible; opacity: 1; }
"#;

/// Single-page HTML with a floating tooltip driven by the cells' `<title>` text.
pub fn compose_html(
    title: &str,
    chart: &SvgDocument,
    legend: &SvgDocument,
    tooltip: &TooltipOptions,
) -> HeatmapResult<String> {
    let script = format!(
        r#"
(function () {{
  var tooltip = document.getElementById("tooltip");
  document.querySelectorAll(".chart .cell").forEach(function (cell) {{
    var title = cell.querySelector("title");
    if (title) {{
      cell.dataset.tooltip = title.textContent;
      title.remove();
    }}
    cell.addEventListener("mouseover", function (event) {{
      tooltip.textContent = "";
      (cell.dataset.tooltip || "").split("\n").forEach(function (line, i) {{
        if (i > 0) tooltip.appendChild(document.createElement("br"));
        tooltip.appendChild(document.createTextNode(line));
      }});
      tooltip.setAttribute("data-year", cell.getAttribute("data-year"));
      tooltip.style.top = (event.pageY + ({dy})) + "px";
      tooltip.style.left = (event.pageX + ({dx})) + "px";
      tooltip.classList.add("show");
    }});
    cell.addEventListener("mouseout", function () {{
      tooltip.classList.remove("show");
    }});
  }});
}})();
"#,
        dx = fmt_num(tooltip.offset_x),
        dy = fmt_num(tooltip.offset_y),
    );

    if chart.root.name() != "svg" || legend.root.name() != "svg" {
        return Err(HeatmapError::Render(
            "chart and legend must be svg documents".to_string(),
        ));
    }

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<div class="chart">
{chart}
{legend}
<div id="tooltip"></div>
</div>
<script>{script}</script>
</body>
</html>
"#,
        title = escape_text(title),
        style = STYLE,
        chart = chart.markup(),
        legend = legend.markup(),
        script = script,
    ))
}
