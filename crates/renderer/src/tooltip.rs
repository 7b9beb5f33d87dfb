//! Hover tooltip content for heatmap cells.

use heatmap_common::TemperatureRecord;
use serde::{Deserialize, Serialize};

use crate::format::{FormatType, NumberFormat, SignMode};

const ONE_DECIMAL: NumberFormat = NumberFormat {
    sign: SignMode::Minus,
    grouping: false,
    precision: Some(1),
    kind: FormatType::Fixed,
};

const SIGNED_ONE_DECIMAL: NumberFormat = NumberFormat {
    sign: SignMode::Plus,
    ..ONE_DECIMAL
};

/// Text shown when the pointer is over a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub month: String,
    pub year: i32,
    pub temperature: f64,
    pub delta: f64,
}

impl Tooltip {
    /// The delta is taken from the temperature as displayed, so the two
    /// values shown always add up to the baseline.
    pub fn for_record(record: &TemperatureRecord, base_temperature: f64) -> Self {
        let temperature = record.temperature(base_temperature);
        let shown = ONE_DECIMAL
            .format(temperature)
            .parse::<f64>()
            .unwrap_or(temperature);
        Self {
            month: record.month_name().unwrap_or_default().to_string(),
            year: record.year,
            temperature,
            delta: shown - base_temperature,
        }
    }

    /// `["January - 2000", "7.0°C", "-1.0°C"]`
    pub fn lines(&self) -> [String; 3] {
        [
            format!("{} - {}", self.month, self.year),
            format!("{}°C", ONE_DECIMAL.format(self.temperature)),
            format!("{}°C", SIGNED_ONE_DECIMAL.format(self.delta)),
        ]
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }
}

/// Placement of the floating tooltip relative to the pointer, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipOptions {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            offset_x: -80.0,
            offset_y: -240.0,
        }
    }
}
