use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An opaque 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);
    pub const GRAY: Rgb = Rgb::new(0x88, 0x88, 0x88);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#RRGGBB`
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    /// Parse `#RRGGBB` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Material Design swatches offered by the color picker rows, in display order.
pub const MATERIAL_PALETTE: [Rgb; 21] = [
    Rgb::new(0xFF, 0xFF, 0xFF), // White
    Rgb::new(0xFF, 0xEB, 0x3B), // Yellow
    Rgb::new(0xFF, 0xC1, 0x07), // Amber
    Rgb::new(0xFF, 0x98, 0x00), // Orange
    Rgb::new(0xFF, 0x57, 0x22), // Deep Orange
    Rgb::new(0xF4, 0x43, 0x36), // Red
    Rgb::new(0xE9, 0x1E, 0x63), // Pink
    Rgb::new(0x9C, 0x27, 0xB0), // Purple
    Rgb::new(0x67, 0x3A, 0xB7), // Deep Purple
    Rgb::new(0x3F, 0x51, 0xB5), // Indigo
    Rgb::new(0x21, 0x96, 0xF3), // Blue
    Rgb::new(0x03, 0xA9, 0xF4), // Light Blue
    Rgb::new(0x00, 0xBC, 0xD4), // Cyan
    Rgb::new(0x00, 0x96, 0x88), // Teal
    Rgb::new(0x4C, 0xAF, 0x50), // Green
    Rgb::new(0x8B, 0xC3, 0x4A), // Lime Green
    Rgb::new(0xCD, 0xDC, 0x39), // Lime
    Rgb::new(0x60, 0x7D, 0x8B), // Blue Grey
    Rgb::new(0x9E, 0x9E, 0x9E), // Grey
    Rgb::new(0x79, 0x55, 0x48), // Brown
    Rgb::new(0x00, 0x00, 0x00), // Black
];

/// Colors of the hands and complication outlines, derived from the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandPalette {
    pub hands_and_complications: Rgb,
    pub shadow: Rgb,
}

impl HandPalette {
    /// A white background gets dark hands; everything else gets light hands.
    #[must_use]
    pub fn for_background(background: Rgb) -> Self {
        if background == Rgb::WHITE {
            Self {
                hands_and_complications: Rgb::BLACK,
                shadow: Rgb::WHITE,
            }
        } else {
            Self {
                hands_and_complications: Rgb::WHITE,
                shadow: Rgb::BLACK,
            }
        }
    }
}
