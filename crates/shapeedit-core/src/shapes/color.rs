//! Color conversion between panel strings and render colors.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a panel color string (`#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`).
    ///
    /// Anything else falls back to black.
    pub fn parse_hex(color: &str) -> Self {
        let color = color.trim();
        if color.eq_ignore_ascii_case("transparent") {
            return Self::transparent();
        }

        let Some(hex) = color.strip_prefix('#') else {
            return Self::black();
        };
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::black();
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).unwrap_or(0)
        };
        match hex.len() {
            // #rgb -> #rrggbb
            3 => Self::new(channel(0..1) * 17, channel(1..2) * 17, channel(2..3) * 17, 255),
            6 => Self::new(channel(0..2), channel(2..4), channel(4..6), 255),
            8 => Self::new(channel(0..2), channel(2..4), channel(4..6), channel(6..8)),
            _ => Self::black(),
        }
    }

    /// Format as `#rrggbb` (alpha dropped when opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(SerializableColor::parse_hex("#000"), SerializableColor::black());
        assert_eq!(SerializableColor::parse_hex("#fff"), SerializableColor::white());
    }

    #[test]
    fn test_parse_long_hex() {
        let green = SerializableColor::parse_hex("#4caf50");
        assert_eq!(green, SerializableColor::new(0x4c, 0xaf, 0x50, 255));
        assert_eq!(green.to_hex(), "#4caf50");
        let faded = SerializableColor::parse_hex("#2196f380");
        assert_eq!(faded.a, 0x80);
    }

    #[test]
    fn test_parse_fallback() {
        assert_eq!(SerializableColor::parse_hex("transparent"), SerializableColor::transparent());
        assert_eq!(SerializableColor::parse_hex("red"), SerializableColor::black());
        assert_eq!(SerializableColor::parse_hex("#zzzzzz"), SerializableColor::black());
    }

    #[test]
    fn test_peniko_round_trip() {
        let color = SerializableColor::parse_hex("#ff9800");
        let peniko_color: Color = color.into();
        assert_eq!(SerializableColor::from(peniko_color), color);
    }
}
