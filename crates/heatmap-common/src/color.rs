//! RGBA color values used by color scales and rendered documents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HeatmapError;

/// An 8-bit RGBA color.
///
/// Serialized as a CSS-style hex string (`#rrggbb`, or `#rrggbbaa` when not
/// fully opaque) so palettes can be written by hand in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Parse a hex color: `#rgb`, `#rrggbb` or `#rrggbbaa`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    out[i] = v * 16 + v;
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Some(Self::rgb(
                channel(hex.get(0..2)?)?,
                channel(hex.get(2..4)?)?,
                channel(hex.get(4..6)?)?,
            )),
            8 => Some(Self::rgba(
                channel(hex.get(0..2)?)?,
                channel(hex.get(2..4)?)?,
                channel(hex.get(4..6)?)?,
                channel(hex.get(6..8)?)?,
            )),
            _ => None,
        }
    }

    /// Lowercase hex representation; alpha is only included when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name.to_lowercase().as_str() {
            "transparent" => Self::transparent(),
            "black" => Self::rgb(0, 0, 0),
            "white" => Self::rgb(255, 255, 255),
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "lightgray" | "lightgrey" => Self::rgb(211, 211, 211),
            _ => return None,
        };
        Some(color)
    }
}

impl FromStr for Color {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::named(s)
            .or_else(|| Color::from_hex(s))
            .ok_or_else(|| HeatmapError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = HeatmapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FF5500"), Some(Color::rgb(255, 85, 0)));
        assert_eq!(Color::from_hex("313695"), Some(Color::rgb(0x31, 0x36, 0x95)));
        assert_eq!(Color::from_hex("#fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color::rgba(0, 0, 0, 128))
        );
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex("#12345"), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(0xa5, 0x00, 0x26).to_hex(), "#a50026");
        assert_eq!(Color::transparent().to_hex(), "#00000000");
    }

    #[test]
    fn test_named_and_serde() {
        let c: Color = "LightGray".parse().unwrap();
        assert_eq!(c, Color::rgb(211, 211, 211));

        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: Color = serde_json::from_str("\"#fee090\"").unwrap();
        assert_eq!(back, Color::rgb(0xfe, 0xe0, 0x90));
        assert!(serde_json::from_str::<Color>("\"notacolor\"").is_err());
    }
}
