//! 24-bit RGB colors.
//!
//! Cells carry true-color values. Palette indices met while decoding ANSI
//! input (`30..=37`, `38;5;n`, ...) are expanded to their conventional RGB
//! values so every color in a buffer has one representation.
//!
//! # Examples
//!
//! ```
//! use tessera::Rgb;
//!
//! let accent = Rgb::from_hex("#64b5f6").unwrap();
//! assert_eq!(accent.to_string(), "#64B5F6");
//! assert_eq!(Rgb::from_256_color(196), Rgb::new(255, 0, 0));
//! ```

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An opaque 24-bit color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const CYAN: Self = Self::new(0, 255, 255);
    pub const MAGENTA: Self = Self::new(255, 0, 255);
    pub const GRAY: Self = Self::new(128, 128, 128);

    /// Create a color from components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string (e.g., "#FF0000" or "FF0000").
    ///
    /// Supports 3-char (#RGB) and 6-char (#RRGGBB) formats.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }

        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }

    /// Look up a basic color by name ("red", "bright_blue", ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let (bright, base) = match normalized.strip_prefix("bright_") {
            Some(rest) => (true, rest),
            None => (false, normalized.as_str()),
        };
        let index = match base {
            "black" => 0,
            "red" => 1,
            "green" => 2,
            "yellow" => 3,
            "blue" => 4,
            "magenta" => 5,
            "cyan" => 6,
            "white" => 7,
            "gray" | "grey" => return Some(Self::from_16_color(8)),
            _ => return None,
        };
        Some(Self::from_16_color(if bright { index + 8 } else { index }))
    }

    /// Expand a 256-color palette index.
    #[must_use]
    pub fn from_256_color(index: u8) -> Self {
        match index {
            0 => Self::new(0, 0, 0),
            1 => Self::new(128, 0, 0),
            2 => Self::new(0, 128, 0),
            3 => Self::new(128, 128, 0),
            4 => Self::new(0, 0, 128),
            5 => Self::new(128, 0, 128),
            6 => Self::new(0, 128, 128),
            7 => Self::new(192, 192, 192),
            8 => Self::new(128, 128, 128),
            9 => Self::new(255, 0, 0),
            10 => Self::new(0, 255, 0),
            11 => Self::new(255, 255, 0),
            12 => Self::new(0, 0, 255),
            13 => Self::new(255, 0, 255),
            14 => Self::new(0, 255, 255),
            15 => Self::new(255, 255, 255),
            16..=231 => {
                let idx = index - 16;
                let cube: [u8; 6] = [0, 95, 135, 175, 215, 255];
                Self::new(
                    cube[(idx / 36) as usize],
                    cube[((idx / 6) % 6) as usize],
                    cube[(idx % 6) as usize],
                )
            }
            232..=255 => {
                let gray = 8 + (index - 232) * 10;
                Self::new(gray, gray, gray)
            }
        }
    }

    /// Expand a 16-color (basic ANSI) palette index.
    #[must_use]
    pub fn from_16_color(index: u8) -> Self {
        Self::from_256_color(index & 0x0F)
    }

    /// Lowercase `#rrggbb` form used by golden cell exports.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
            .or_else(|| Self::from_name(s))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
