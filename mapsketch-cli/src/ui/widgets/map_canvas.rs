//! Map canvas widget.
//!
//! Draws, in world pixels through the [`Viewport`]:
//! - the polygon outline once three or more markers exist, following the
//!   marker positions so a drag previews the new shape
//! - one glyph per marker, coloured by its [`MarkerStyle`]
//! - the transient search marker
//!
//! ```text
//! ┌ Standard View │ 48.85660°N 2.35220°E │ z15 ──────────┐
//! │          ●⠤⠤⠤⠤⠤⠤⠤⠤●                                    │
//! │          ⡇          ⢸                                  │
//! │          ●⠤⠤⠤⠤⠤⠤⠤⠤●          ◆                        │
//! └───────────────────────────────────────────────────────┘
//! ```

use mapsketch::geometry::MIN_POLYGON_VERTICES;
use mapsketch::markers::{Marker, MarkerSet, MarkerStyle, PolygonStyle, Rgb, POINT_SCALE};
use mapsketch::view::{MapLayer, TransientMarker};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Block, Borders, Widget,
    },
};

use super::format::{format_lat, format_lng};
use crate::ui::viewport::Viewport;

const MARKER_GLYPH: &str = "●";
const DROP_GLYPH: &str = "▼";
const SEARCH_GLYPH: &str = "◆";

/// Search result marker colour.
const SEARCH_COLOR: Color = Color::Rgb(241, 196, 15);

/// Canvas with the polygon overlay and markers.
pub struct MapCanvas<'a> {
    viewport: &'a Viewport,
    markers: &'a MarkerSet,
    transient: Option<&'a TransientMarker>,
    layer: MapLayer,
}

impl<'a> MapCanvas<'a> {
    pub fn new(viewport: &'a Viewport, markers: &'a MarkerSet, layer: MapLayer) -> Self {
        Self {
            viewport,
            markers,
            transient: None,
            layer,
        }
    }

    pub fn with_transient(mut self, transient: Option<&'a TransientMarker>) -> Self {
        self.transient = transient;
        self
    }

    /// Background colour for a base layer.
    fn background(layer: MapLayer) -> Color {
        match layer {
            MapLayer::Roadmap => Color::Reset,
            MapLayer::Satellite => Color::Rgb(28, 42, 30),
        }
    }

    fn rgb(color: Rgb) -> Color {
        Color::Rgb(color.r, color.g, color.b)
    }

    fn marker_span(marker: &Marker) -> Span<'static> {
        let style: MarkerStyle = marker.style();
        let glyph = if marker.animate_drop {
            DROP_GLYPH
        } else {
            MARKER_GLYPH
        };

        let mut span_style = Style::default().fg(Self::rgb(style.fill));
        if style.scale > POINT_SCALE {
            span_style = span_style.add_modifier(Modifier::BOLD);
        }
        Span::styled(glyph, span_style)
    }

    fn title(&self) -> String {
        let [x_min, x_max] = self.viewport.x_bounds();
        let [y_min, y_max] = self.viewport.y_bounds();
        let center = mapsketch::coord::unproject(
            (x_min + x_max) / 2.0,
            -(y_min + y_max) / 2.0,
            self.viewport.zoom(),
        );

        match center {
            Ok(c) => format!(
                " {} │ {} {} │ z{:.0} ",
                self.layer.label(),
                format_lat(c.lat),
                format_lng(c.lng),
                self.viewport.zoom()
            ),
            Err(_) => format!(" {} ", self.layer.label()),
        }
    }

    fn paint_polygon(&self, ctx: &mut Context<'_>) {
        let ring: Vec<(f64, f64)> = self
            .markers
            .iter()
            .filter_map(|m| self.viewport.to_canvas(m.position))
            .collect();
        if ring.len() < MIN_POLYGON_VERTICES {
            return;
        }

        let color = Self::rgb(PolygonStyle::default().line);
        for (i, &(x1, y1)) in ring.iter().enumerate() {
            let (x2, y2) = ring[(i + 1) % ring.len()];
            ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
        }
    }

    fn paint_markers(&self, ctx: &mut Context<'_>) {
        for marker in self.markers.iter() {
            if let Some((x, y)) = self.viewport.to_canvas(marker.position) {
                ctx.print(x, y, Self::marker_span(marker));
            }
        }

        if let Some(transient) = self.transient {
            if let Some((x, y)) = self.viewport.to_canvas(transient.position) {
                ctx.print(
                    x,
                    y,
                    Span::styled(SEARCH_GLYPH, Style::default().fg(SEARCH_COLOR)),
                );
            }
        }
    }
}

impl Widget for MapCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title())
            .border_style(Style::default().fg(Color::DarkGray));

        Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .background_color(Self::background(self.layer))
            .x_bounds(self.viewport.x_bounds())
            .y_bounds(self.viewport.y_bounds())
            .paint(|ctx| {
                self.paint_polygon(ctx);
                ctx.layer();
                self.paint_markers(ctx);
            })
            .render(area, buf);
    }
}
