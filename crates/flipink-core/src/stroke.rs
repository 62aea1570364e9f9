//! Stroke and frame data model.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a color string is not `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color '{0}': expected #rrggbb")]
pub struct ColorParseError(pub String);

/// Opaque RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Rgb::new(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            3 => {
                // #abc expands to #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Rgb::new(r * 17, g * 17, b * 17))
            }
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
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

/// One freehand polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Points in drawing order.
    pub points: Vec<Point>,
    pub color: Rgb,
    pub width: f64,
}

impl Stroke {
    pub fn new(points: Vec<Point>, color: Rgb, width: f64) -> Self {
        Self { points, color, width }
    }

    /// Whether the stroke produces any visible output.
    ///
    /// Single-point strokes stay in the frame but are never drawn.
    pub fn is_visible(&self) -> bool {
        self.points.len() >= 2
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One animation still: strokes back to front.
pub type Frame = Vec<Stroke>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        let color: Rgb = "#1a2B3c".parse().unwrap();
        assert_eq!(color, Rgb::new(0x1a, 0x2b, 0x3c));
        assert_eq!(color.to_hex(), "#1a2b3c");
    }

    #[test]
    fn test_parse_short_hex() {
        let color: Rgb = "#fff".parse().unwrap();
        assert_eq!(color, Rgb::WHITE);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("000000".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
        assert!("#+1+1+1".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_color_serializes_as_string() {
        let stroke = Stroke::new(vec![Point::new(1.0, 2.0)], Rgb::new(255, 0, 0), 3.0);
        let json = serde_json::to_value(&stroke).unwrap();
        assert_eq!(json["color"], "#ff0000");
    }

    #[test]
    fn test_visibility() {
        let single = Stroke::new(vec![Point::new(0.0, 0.0)], Rgb::BLACK, 3.0);
        assert!(!single.is_visible());
        let pair = Stroke::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)], Rgb::BLACK, 3.0);
        assert!(pair.is_visible());
    }
}
