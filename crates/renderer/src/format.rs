//! Number and tick label formatting.
//!
//! Supports a subset of the common format-spec mini language used by
//! charting tools: `[sign][,][.precision][type]`.
//!
//! | Spec    | 1234.567     | -0.04   |
//! |---------|--------------|---------|
//! | `.1f`   | `1234.6`     | `0.0`   |
//! | `+.1f`  | `+1234.6`    | `+0.0`  |
//! | `d`     | `1235`       | `0`     |
//! | `,d`    | `1,235`      | `0`     |
//! | `.0%`   | `123457%`    | `-4%`   |

use std::fmt;
use std::sync::Arc;

use heatmap_common::{HeatmapError, HeatmapResult};

/// How the sign of a formatted number is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignMode {
    /// `-` for negatives only.
    #[default]
    Minus,
    /// `+` for non-negatives, `-` for negatives.
    Plus,
    /// Space for non-negatives, `-` for negatives.
    Space,
    /// Parentheses around negatives.
    Parens,
}

/// Number presentation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Fixed point.
    Fixed,
    /// Rounded integer.
    Integer,
    /// Multiplied by 100, fixed point, with a `%` suffix.
    Percent,
    /// Exponent notation.
    Exponent,
    /// Shortest representation; precision means significant digits.
    General,
}

/// A parsed format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub sign: SignMode,
    pub grouping: bool,
    pub precision: Option<usize>,
    pub kind: FormatType,
}

impl NumberFormat {
    pub fn parse(spec: &str) -> HeatmapResult<Self> {
        let invalid = || HeatmapError::InvalidFormat(spec.to_string());
        let mut rest = spec;

        let sign = match rest.chars().next() {
            Some('+') => SignMode::Plus,
            Some(' ') => SignMode::Space,
            Some('(') => SignMode::Parens,
            Some('-') => SignMode::Minus,
            _ => SignMode::Minus,
        };
        if matches!(rest.chars().next(), Some('+' | ' ' | '(' | '-')) {
            rest = &rest[1..];
        }

        let grouping = rest.starts_with(',');
        if grouping {
            rest = &rest[1..];
        }

        let mut precision = None;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let digits: String = after_dot.chars().take_while(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                return Err(invalid());
            }
            precision = Some(digits.parse::<usize>().map_err(|_| invalid())?);
            rest = &after_dot[digits.len()..];
        }

        let kind = match rest {
            "f" => FormatType::Fixed,
            "d" => FormatType::Integer,
            "%" => FormatType::Percent,
            "e" => FormatType::Exponent,
            "" => FormatType::General,
            _ => return Err(invalid()),
        };

        if precision.is_some_and(|p| p > 20) {
            return Err(invalid());
        }

        Ok(Self {
            sign,
            grouping,
            precision,
            kind,
        })
    }

    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }

        let magnitude = value.abs();
        let (mut body, suffix) = match self.kind {
            FormatType::Fixed => (format!("{:.*}", self.precision.unwrap_or(6), magnitude), ""),
            FormatType::Integer => (format!("{}", magnitude.round()), ""),
            FormatType::Percent => (
                format!("{:.*}", self.precision.unwrap_or(6), magnitude * 100.0),
                "%",
            ),
            FormatType::Exponent => (
                exponent_sign(format!("{:.*e}", self.precision.unwrap_or(6), magnitude)),
                "",
            ),
            FormatType::General => (general(magnitude, self.precision), ""),
        };

        if self.grouping && !matches!(self.kind, FormatType::Exponent) {
            body = group_thousands(&body);
        }

        // Values that round to zero never show a minus sign.
        let rounds_to_zero = body.chars().all(|c| !c.is_ascii_digit() || c == '0');
        let negative = value < 0.0 && !rounds_to_zero;

        match (self.sign, negative) {
            (SignMode::Parens, true) => format!("({}{})", body, suffix),
            (_, true) => format!("-{}{}", body, suffix),
            (SignMode::Plus, false) => format!("+{}{}", body, suffix),
            (SignMode::Space, false) => format!(" {}{}", body, suffix),
            (_, false) => format!("{}{}", body, suffix),
        }
    }
}

impl std::str::FromStr for NumberFormat {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumberFormat::parse(s)
    }
}

fn general(magnitude: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) if magnitude != 0.0 && magnitude.is_finite() => {
            let p = p.max(1) as i32;
            let exp = magnitude.log10().floor() as i32;
            let factor = 10f64.powi(p - 1 - exp);
            format!("{}", (magnitude * factor).round() / factor)
        }
        _ => format!("{}", magnitude),
    }
}

/// Rust prints `1.5e3`; labels read better as `1.5e+3`.
fn exponent_sign(s: String) -> String {
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    }
}

fn group_thousands(body: &str) -> String {
    let (int_part, frac_part) = match body.find('.') {
        Some(i) => body.split_at(i),
        None => (body, ""),
    };
    if !int_part.chars().all(|c| c.is_ascii_digit()) {
        return body.to_string();
    }
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.push_str(frac_part);
    grouped
}

/// Label formatter for axis and legend ticks.
#[derive(Clone, Default)]
pub enum TickFormat {
    /// Plain value, shortest representation.
    #[default]
    Identity,
    /// A parsed format specifier.
    Spec(NumberFormat),
    /// An arbitrary function.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl TickFormat {
    pub fn spec(spec: &str) -> HeatmapResult<Self> {
        Ok(TickFormat::Spec(NumberFormat::parse(spec)?))
    }

    pub fn custom(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        TickFormat::Custom(Arc::new(f))
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Identity => format!("{}", value),
            TickFormat::Spec(spec) => spec.format(value),
            TickFormat::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickFormat::Identity => f.write_str("Identity"),
            TickFormat::Spec(spec) => f.debug_tuple("Spec").field(spec).finish(),
            TickFormat::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Calendar month name for `1..=12`.
pub fn format_month(month: u32) -> Option<&'static str> {
    heatmap_common::dataset::month_name(month)
}

/// Month name for an axis tick; only whole numbers 1..=12 get a label.
pub fn month_tick_label(value: f64) -> String {
    if value.fract() != 0.0 || !(1.0..=12.0).contains(&value) {
        return String::new();
    }
    format_month(value as u32).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(spec: &str, value: f64) -> String {
        NumberFormat::parse(spec).unwrap().format(value)
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fmt(".1f", 7.0), "7.0");
        assert_eq!(fmt(".1f", 8.66 - 1.366), "7.3");
        assert_eq!(fmt(".1f", -0.04), "0.0");
        assert_eq!(fmt(".2f", 2.8), "2.80");
    }

    #[test]
    fn test_explicit_sign() {
        assert_eq!(fmt("+.1f", -1.0), "-1.0");
        assert_eq!(fmt("+.1f", 1.26), "+1.3");
        assert_eq!(fmt("+.1f", 0.0), "+0.0");
        assert_eq!(fmt("+.1f", -0.04), "+0.0");
        assert_eq!(fmt(" .1f", 3.0), " 3.0");
        assert_eq!(fmt("(.1f", -3.0), "(3.0)");
    }

    #[test]
    fn test_integer_and_grouping() {
        assert_eq!(fmt("d", 1753.0), "1753");
        assert_eq!(fmt("d", 2.6), "3");
        assert_eq!(fmt(",d", 1234567.0), "1,234,567");
        assert_eq!(fmt(",.2f", -9876.5), "-9,876.50");
    }

    #[test]
    fn test_percent_exponent_general() {
        assert_eq!(fmt(".0%", 0.256), "26%");
        assert_eq!(fmt(".1e", 1500.0), "1.5e+3");
        assert_eq!(fmt(".1e", 0.015), "1.5e-2");
        assert_eq!(fmt("", 2.8), "2.8");
        assert_eq!(fmt(".2", 12.345), "12");
    }

    #[test]
    fn test_invalid_specs() {
        for spec in ["x", ".f", "+.1q", "..1f", ".99f"] {
            assert!(NumberFormat::parse(spec).is_err(), "spec {:?}", spec);
        }
    }

    #[test]
    fn test_tick_format_variants() {
        assert_eq!(TickFormat::Identity.format(2.8), "2.8");
        assert_eq!(TickFormat::Identity.format(5.0), "5");
        assert_eq!(TickFormat::spec(".1f").unwrap().format(5.0), "5.0");
        let custom = TickFormat::custom(|v| format!("{}°", v));
        assert_eq!(custom.format(3.0), "3°");
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month(1), Some("January"));
        assert_eq!(format_month(12), Some("December"));
        assert_eq!(format_month(0), None);
        assert_eq!(format_month(13), None);
    }

    #[test]
    fn test_month_tick_label() {
        assert_eq!(month_tick_label(1.0), "January");
        assert_eq!(month_tick_label(12.0), "December");
        assert_eq!(month_tick_label(0.5), "");
        assert_eq!(month_tick_label(13.0), "");
    }
}
