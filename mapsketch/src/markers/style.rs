//! Visual styling for markers and the polygon overlay.

use std::fmt;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Formats as `#rrggbb`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Marker fill colour.
pub const POINT_COLOR: Rgb = Rgb::new(0xe7, 0x4c, 0x3c);

/// Marker fill colour while hovered or dragged.
pub const HOVER_COLOR: Rgb = Rgb::new(0x2e, 0xcc, 0x71);

/// Marker outline colour.
pub const STROKE_COLOR: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Polygon outline colour.
pub const LINE_COLOR: Rgb = Rgb::new(0x34, 0x98, 0xdb);

/// Polygon fill colour, drawn at [`FILL_OPACITY`].
pub const FILL_COLOR: Rgb = Rgb::new(52, 152, 219);

pub const FILL_OPACITY: f64 = 0.3;

/// Marker scale at rest.
pub const POINT_SCALE: u8 = 10;

/// Marker scale while hovered or dragged.
pub const HOVER_SCALE: u8 = 12;

/// How a single marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub scale: u8,
}

impl MarkerStyle {
    /// Resting style.
    pub const NORMAL: Self = Self {
        fill: POINT_COLOR,
        stroke: STROKE_COLOR,
        scale: POINT_SCALE,
    };

    /// Highlighted style.
    pub const HOVERED: Self = Self {
        fill: HOVER_COLOR,
        stroke: STROKE_COLOR,
        scale: HOVER_SCALE,
    };
}

/// How the polygon overlay is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub line: Rgb,
    pub fill: Rgb,
    pub fill_opacity: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            line: LINE_COLOR,
            fill: FILL_COLOR,
            fill_opacity: FILL_OPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_style_is_larger() {
        assert!(MarkerStyle::HOVERED.scale > MarkerStyle::NORMAL.scale);
        assert_eq!(MarkerStyle::HOVERED.stroke, MarkerStyle::NORMAL.stroke);
    }

    #[test]
    fn test_colors_display_as_hex() {
        assert_eq!(MarkerStyle::NORMAL.fill.to_string(), "#e74c3c");
        assert_eq!(MarkerStyle::HOVERED.fill.to_string(), "#2ecc71");
        assert_eq!(STROKE_COLOR.to_string(), "#ffffff");
        assert_eq!(PolygonStyle::default().line.to_string(), "#3498db");
    }

    #[test]
    fn test_polygon_fill_matches_outline_hue() {
        let style = PolygonStyle::default();
        assert_eq!(style.fill, style.line);
        assert_eq!(style.fill_opacity, 0.3);
    }
}
