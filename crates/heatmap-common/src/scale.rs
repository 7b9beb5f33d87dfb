//! Scales mapping data values to colors and screen coordinates.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{HeatmapError, HeatmapResult};

/// Breakpoints of the default temperature palette, in °C.
pub const TEMPERATURE_THRESHOLDS: [f64; 10] =
    [2.8, 3.9, 5.0, 6.1, 7.2, 8.3, 9.5, 10.6, 11.7, 12.8];

/// 11-class RdYlBu, ordered cold (blue) to hot (red).
pub const TEMPERATURE_COLORS: [Color; 11] = [
    Color::rgb(0x31, 0x36, 0x95),
    Color::rgb(0x45, 0x75, 0xb4),
    Color::rgb(0x74, 0xad, 0xd1),
    Color::rgb(0xab, 0xd9, 0xe9),
    Color::rgb(0xe0, 0xf3, 0xf8),
    Color::rgb(0xff, 0xff, 0xbf),
    Color::rgb(0xfe, 0xe0, 0x90),
    Color::rgb(0xfd, 0xae, 0x61),
    Color::rgb(0xf4, 0x6d, 0x43),
    Color::rgb(0xd7, 0x30, 0x27),
    Color::rgb(0xa5, 0x00, 0x26),
];

/// Discrete color classification by ascending breakpoints.
///
/// A scale with `n` thresholds has `n + 1` colors. A value equal to a
/// threshold belongs to the bucket above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdScaleDef", into = "ThresholdScaleDef")]
pub struct ThresholdScale {
    thresholds: Vec<f64>,
    colors: Vec<Color>,
}

/// Serialized form of a [`ThresholdScale`], validated on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdScaleDef {
    pub thresholds: Vec<f64>,
    pub colors: Vec<Color>,
}

impl ThresholdScale {
    pub fn new(thresholds: Vec<f64>, colors: Vec<Color>) -> HeatmapResult<Self> {
        if colors.len() != thresholds.len() + 1 {
            return Err(HeatmapError::InvalidScale(format!(
                "{} thresholds need {} colors, got {}",
                thresholds.len(),
                thresholds.len() + 1,
                colors.len()
            )));
        }
        if let Some(bad) = thresholds.iter().find(|t| !t.is_finite()) {
            return Err(HeatmapError::InvalidScale(format!(
                "threshold {} is not finite",
                bad
            )));
        }
        if thresholds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(HeatmapError::InvalidScale(
                "thresholds must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { thresholds, colors })
    }

    /// The palette used for monthly global temperatures.
    pub fn temperature() -> Self {
        Self {
            thresholds: TEMPERATURE_THRESHOLDS.to_vec(),
            colors: TEMPERATURE_COLORS.to_vec(),
        }
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Index of the bucket `value` falls into, or `None` for NaN.
    pub fn bucket(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        Some(self.thresholds.partition_point(|t| *t <= value))
    }

    /// Color for `value`, or `None` when the value cannot be classified.
    pub fn color_for(&self, value: f64) -> Option<Color> {
        self.bucket(value).map(|i| self.colors[i])
    }

    /// Value range `[lower, upper)` covered by a color; open ends are `None`.
    pub fn extent(&self, bucket: usize) -> Option<(Option<f64>, Option<f64>)> {
        if bucket >= self.colors.len() {
            return None;
        }
        let lower = bucket.checked_sub(1).map(|i| self.thresholds[i]);
        let upper = self.thresholds.get(bucket).copied();
        Some((lower, upper))
    }
}

impl Default for ThresholdScale {
    fn default() -> Self {
        Self::temperature()
    }
}

impl TryFrom<ThresholdScaleDef> for ThresholdScale {
    type Error = HeatmapError;

    fn try_from(def: ThresholdScaleDef) -> Result<Self, Self::Error> {
        ThresholdScale::new(def.thresholds, def.colors)
    }
}

impl From<ThresholdScale> for ThresholdScaleDef {
    fn from(scale: ThresholdScale) -> Self {
        Self {
            thresholds: scale.thresholds,
            colors: scale.colors,
        }
    }
}

/// Continuous linear mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    round: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    /// Same mapping, with outputs rounded to whole pixels.
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        // Degenerate domains map everything to the middle of the range.
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        let out = r0 + t * (r1 - r0);
        if self.round {
            round_half_up(out)
        } else {
            out
        }
    }

    /// Roughly `count` evenly spaced, human-friendly values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Rounds .5 toward positive infinity, matching browser pixel rounding.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Tick values in steps of 1, 2 or 5 times a power of ten.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };

    let Some((i1, i2, inc)) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut ticks: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect();
    if reverse {
        ticks.reverse();
    }
    ticks
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * inv);
        i2 = round_half_up(stop * inv);
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = round_half_up(start / step);
        i2 = round_half_up(stop / step);
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_scale_is_valid() {
        let scale = ThresholdScale::temperature();
        let rebuilt =
            ThresholdScale::new(scale.thresholds().to_vec(), scale.colors().to_vec()).unwrap();
        assert_eq!(rebuilt, scale);
        assert_eq!(scale.colors().len(), scale.thresholds().len() + 1);
    }

    #[test]
    fn test_boundary_goes_to_upper_bucket() {
        let scale = ThresholdScale::temperature();
        assert_eq!(scale.bucket(2.79), Some(0));
        assert_eq!(scale.bucket(2.8), Some(1));
        assert_eq!(scale.bucket(12.8), Some(10));
        assert_eq!(scale.bucket(-40.0), Some(0));
        assert_eq!(scale.bucket(f64::INFINITY), Some(10));
        assert_eq!(scale.bucket(f64::NAN), None);
    }

    #[test]
    fn test_extent() {
        let scale = ThresholdScale::temperature();
        assert_eq!(scale.extent(0), Some((None, Some(2.8))));
        assert_eq!(scale.extent(1), Some((Some(2.8), Some(3.9))));
        assert_eq!(scale.extent(10), Some((Some(12.8), None)));
        assert_eq!(scale.extent(11), None);
    }

    #[test]
    fn test_linear_scale_apply() {
        let x = LinearScale::new((1753.0, 2016.0), (0.0, 1200.0));
        assert_eq!(x.apply(1753.0), 0.0);
        assert_eq!(x.apply(2016.0), 1200.0);

        let flat = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(flat.apply(5.0), 50.0);

        let r = LinearScale::new((-1.0, 2.0), (0.0, 320.0)).rounded();
        assert_eq!(r.apply(0.0), 107.0);
        assert_eq!(r.apply(1.0), 213.0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(2.4), 2.0);
    }
}
