//! Dashboard palette
//!
//! Colors are plain 8-bit RGB triples; the viz crate converts them to
//! terminal colors and CSS strings.

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidColor(hex.to_string()));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(CoreError::InvalidColor(hex.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| CoreError::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS functional notation, `rgb(r, g, b)`
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub mod colors {
    use super::Rgb;

    pub const GREEN: Rgb = Rgb::new(0x00, 0xaa, 0x00);
    pub const LIGHT_GREEN: Rgb = Rgb::new(0xb0, 0xd5, 0x13);
    pub const YELLOW: Rgb = Rgb::new(0xea, 0xbe, 0x06);
    pub const ORANGE: Rgb = Rgb::new(0xed, 0x7d, 0x20);
    pub const RED: Rgb = Rgb::new(0xd4, 0x33, 0x3f);
    pub const GRAY_71: Rgb = Rgb::new(0xb4, 0xb4, 0xb4);
    pub const GRAY_60: Rgb = Rgb::new(0x99, 0x99, 0x99);
    pub const BASE_FONT: Rgb = Rgb::new(0x33, 0x33, 0x33);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Rgb::from_hex("#d4333f").unwrap(), colors::RED);
        assert_eq!(colors::RED.to_hex(), "#d4333f");
        assert_eq!(Rgb::from_hex("999").unwrap(), colors::GRAY_60);
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#gggggg").is_err());
        assert!(Rgb::from_hex("aébcd").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_deserialize_rejects_non_hex() {
        assert!(serde_json::from_str::<Rgb>("\"#aébcd\"").is_err());
        let color: Rgb = serde_json::from_str("\"#00aa00\"").unwrap();
        assert_eq!(color, colors::GREEN);
    }

    #[test]
    fn test_css_notation() {
        assert_eq!(colors::GREEN.to_css(), "rgb(0, 170, 0)");
    }
}
