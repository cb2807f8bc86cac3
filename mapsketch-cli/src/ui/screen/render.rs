//! Map screen layout and rendering.
//!
//! ```text
//! ┌─────────────────────────────────────────┬──────────────┐
//! │                                         │ Search (3)   │
//! │                                         ├──────────────┤
//! │ Map                                     │ Start Over(3)│
//! │                                         ├──────────────┤
//! │                                         │ Toggle (3)   │
//! │                                         ├──────────────┤
//! │                                         │ Polygon      │
//! ├─────────────────────────────────────────┴──────────────┤
//! │ Key help (1 line)                                       │
//! └─────────────────────────────────────────────────────────┘
//! ```

use mapsketch::markers::MarkerSet;
use mapsketch::store::Snapshot;
use mapsketch::view::{MapLayer, TransientMarker};
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::state::{InputMode, MouseTarget};
use crate::ui::viewport::Viewport;
use crate::ui::widgets::{AlertPopup, Button, MapCanvas, PointsPanel, SearchField};

/// Sidebar width in cells.
pub const SIDEBAR_WIDTH: u16 = 34;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Bordered map block.
    pub map: Rect,
    pub search: Rect,
    pub reset_button: Rect,
    pub toggle_button: Rect,
    pub points: Rect,
    pub help: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(SIDEBAR_WIDTH)])
            .split(rows[0]);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search
                Constraint::Length(3), // Start Over
                Constraint::Length(3), // Layer toggle
                Constraint::Min(4),    // Points
            ])
            .split(columns[1]);

        Self {
            map: columns[0],
            search: sidebar[0],
            reset_button: sidebar[1],
            toggle_button: sidebar[2],
            points: sidebar[3],
            help: rows[1],
        }
    }

    /// Drawable area inside the map border.
    pub fn map_inner(&self) -> Rect {
        self.map.inner(Margin {
            horizontal: 1,
            vertical: 1,
        })
    }

    /// Classify a pointer position.
    ///
    /// `on_map` resolves map cells to a [`MouseTarget::Map`].
    pub fn target_at(
        &self,
        column: u16,
        row: u16,
        on_map: impl FnOnce() -> Option<MouseTarget>,
    ) -> MouseTarget {
        let hit = |r: Rect| column >= r.x && column < r.right() && row >= r.y && row < r.bottom();

        if hit(self.map_inner()) {
            on_map().unwrap_or(MouseTarget::Elsewhere)
        } else if hit(self.search) {
            MouseTarget::SearchField
        } else if hit(self.reset_button) {
            MouseTarget::ResetButton
        } else if hit(self.toggle_button) {
            MouseTarget::ToggleButton
        } else {
            MouseTarget::Elsewhere
        }
    }
}

/// Everything a frame needs.
pub struct RenderContext<'a> {
    pub layout: ScreenLayout,
    pub viewport: &'a Viewport,
    pub markers: &'a MarkerSet,
    pub transient: Option<&'a TransientMarker>,
    pub layer: MapLayer,
    pub snapshot: &'a Snapshot,
    pub display_area: f64,
    pub mode: InputMode,
    pub search_input: &'a str,
    pub alert: Option<&'a str>,
}

/// Label for the layer toggle: the layer it switches to.
pub fn toggle_label(layer: MapLayer) -> &'static str {
    match layer {
        MapLayer::Roadmap => MapLayer::Satellite.label(),
        MapLayer::Satellite => MapLayer::Roadmap.label(),
    }
}

/// Render one frame.
pub fn render_ui(frame: &mut Frame, ctx: &RenderContext<'_>) {
    let layout = &ctx.layout;

    frame.render_widget(
        MapCanvas::new(ctx.viewport, ctx.markers, ctx.layer).with_transient(ctx.transient),
        layout.map,
    );
    frame.render_widget(
        SearchField::new(ctx.search_input, ctx.mode == InputMode::Search),
        layout.search,
    );
    frame.render_widget(Button::new("Start Over", 'r'), layout.reset_button);
    frame.render_widget(Button::new(toggle_label(ctx.layer), 't'), layout.toggle_button);
    frame.render_widget(
        PointsPanel::new(ctx.snapshot, ctx.display_area),
        layout.points,
    );
    frame.render_widget(Paragraph::new(help_line(ctx.mode)), layout.help);

    if let Some(message) = ctx.alert {
        frame.render_widget(AlertPopup::new(message), frame.area());
    }
}

fn help_line(mode: InputMode) -> Line<'static> {
    let key = Style::default().fg(Color::Cyan);
    let text = Style::default().fg(Color::DarkGray);
    let pairs: &[(&str, &str)] = match mode {
        InputMode::Map => &[
            ("click", " add point  "),
            ("drag", " move point  "),
            ("/", " search  "),
            ("r", " start over  "),
            ("t", " toggle view  "),
            ("+/-", " zoom  "),
            ("arrows", " pan  "),
            ("q", " quit"),
        ],
        InputMode::Search => &[("enter", " search  "), ("esc", " back to map")],
    };

    Line::from(
        pairs
            .iter()
            .flat_map(|(k, t)| [Span::styled(*k, key), Span::styled(*t, text)])
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsketch::coord::LatLng;

    #[test]
    fn test_layout_regions_do_not_overlap_map() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 120, 40));

        assert_eq!(layout.search.width, SIDEBAR_WIDTH);
        assert_eq!(layout.map.width, 120 - SIDEBAR_WIDTH);
        assert_eq!(layout.help.height, 1);
        assert!(layout.reset_button.y > layout.search.y);
        assert!(layout.toggle_button.y > layout.reset_button.y);
    }

    #[test]
    fn test_target_at_classifies_regions() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 120, 40));
        let coord = LatLng::new_unchecked(0.0, 0.0);
        let on_map = || Some(MouseTarget::Map { coord, marker: None });

        assert_eq!(
            layout.target_at(5, 5, on_map),
            MouseTarget::Map { coord, marker: None }
        );
        assert_eq!(
            layout.target_at(layout.reset_button.x + 2, layout.reset_button.y + 1, on_map),
            MouseTarget::ResetButton
        );
        assert_eq!(
            layout.target_at(layout.toggle_button.x + 2, layout.toggle_button.y + 1, on_map),
            MouseTarget::ToggleButton
        );
        assert_eq!(
            layout.target_at(layout.search.x + 1, layout.search.y + 1, on_map),
            MouseTarget::SearchField
        );
        // Map border
        assert_eq!(layout.target_at(0, 0, on_map), MouseTarget::Elsewhere);
    }

    #[test]
    fn test_toggle_label_names_other_layer() {
        assert_eq!(toggle_label(MapLayer::Roadmap), "Satellite View");
        assert_eq!(toggle_label(MapLayer::Satellite), "Standard View");
    }
}
