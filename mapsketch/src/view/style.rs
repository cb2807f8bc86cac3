//! Base layers and their declarative render-style tables.

use std::fmt;

/// Base map layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapLayer {
    #[default]
    Roadmap,
    Satellite,
}

impl MapLayer {
    /// Identifier understood by the map service.
    pub fn id(&self) -> &'static str {
        match self {
            MapLayer::Roadmap => "roadmap",
            MapLayer::Satellite => "satellite",
        }
    }

    /// Human-readable label for the view toggle.
    pub fn label(&self) -> &'static str {
        match self {
            MapLayer::Roadmap => "Standard View",
            MapLayer::Satellite => "Satellite View",
        }
    }

    /// Style rules the layer hands to the renderer.
    pub fn styles(&self) -> &'static [StyleRule] {
        match self {
            MapLayer::Roadmap => STANDARD_STYLES,
            MapLayer::Satellite => SATELLITE_STYLES,
        }
    }
}

impl fmt::Display for MapLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single style adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Styler {
    Saturation(i32),
    Lightness(i32),
    Gamma(f64),
    Color(&'static str),
}

/// One declarative style rule.
///
/// A rule without a feature or element type applies to the whole map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRule {
    pub feature_type: Option<&'static str>,
    pub element_type: Option<&'static str>,
    pub stylers: &'static [Styler],
}

/// Muted landscape with light blue water.
pub const STANDARD_STYLES: &[StyleRule] = &[
    StyleRule {
        feature_type: Some("landscape"),
        element_type: Some("geometry"),
        stylers: &[Styler::Saturation(-100), Styler::Lightness(50)],
    },
    StyleRule {
        feature_type: Some("water"),
        element_type: Some("geometry"),
        stylers: &[Styler::Color("#a3ccff")],
    },
];

/// Slightly darkened, desaturated imagery.
pub const SATELLITE_STYLES: &[StyleRule] = &[StyleRule {
    feature_type: None,
    element_type: None,
    stylers: &[
        Styler::Gamma(0.8),
        Styler::Saturation(-20),
        Styler::Lightness(-10),
    ],
}];
