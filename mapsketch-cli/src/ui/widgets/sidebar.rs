//! Sidebar widgets: search field, buttons and the points panel.
//!
//! ```text
//! ┌ Search ─────────────────────┐
//! │ Eiffel Tower█               │
//! └─────────────────────────────┘
//! ┌─────────────────────────────┐
//! │         Start Over          │
//! └─────────────────────────────┘
//! ┌─────────────────────────────┐
//! │       Satellite View        │
//! └─────────────────────────────┘
//! ┌ Polygon ────────────────────┐
//! │ Points: 3                   │
//! │ Area: 1,204 m²              │
//! │                             │
//! │ Point Locations             │
//! │ 1. 5 Avenue Anatole Fr…     │
//! │ 2. Loading...               │
//! └─────────────────────────────┘
//! ```

use mapsketch::geometry::format_area;
use mapsketch::store::{LocationStatus, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::format::truncate;

/// Text input for place search.
pub struct SearchField<'a> {
    input: &'a str,
    active: bool,
}

impl<'a> SearchField<'a> {
    pub fn new(input: &'a str, active: bool) -> Self {
        Self { input, active }
    }
}

impl Widget for SearchField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let line = if self.input.is_empty() && !self.active {
            Line::from(Span::styled(
                "Search for a place (/)",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let width = area.width.saturating_sub(3) as usize;
            let mut spans = vec![Span::raw(tail(self.input, width))];
            if self.active {
                spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
            }
            Line::from(spans)
        };

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Search ")
                    .border_style(border),
            )
            .render(area, buf);
    }
}

/// Last `width` characters of `text`, so the cursor end stays visible.
fn tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(width)).collect()
}

/// Bordered, centred button.
pub struct Button<'a> {
    label: &'a str,
    hotkey: char,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, hotkey: char) -> Self {
        Self { label, hotkey }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(self.label, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" ({})", self.hotkey),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .render(area, buf);
    }
}

/// Shown instead of the point details until the first point is placed.
const EMPTY_HINT: &str = "Click on the map to add points";

/// Point count, area and the per-point address list.
pub struct PointsPanel<'a> {
    snapshot: &'a Snapshot,
    area_m2: f64,
}

impl<'a> PointsPanel<'a> {
    /// `area_m2` is shown instead of the snapshot's area so a drag preview
    /// can be displayed.
    pub fn new(snapshot: &'a Snapshot, area_m2: f64) -> Self {
        Self { snapshot, area_m2 }
    }

    fn location_style(status: &LocationStatus) -> Style {
        match status {
            LocationStatus::Pending => Style::default().fg(Color::DarkGray),
            LocationStatus::Resolved(_) => Style::default(),
            LocationStatus::NotFound => Style::default().fg(Color::Yellow),
            LocationStatus::Failed => Style::default().fg(Color::Red),
        }
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        if self.snapshot.is_empty() {
            return vec![Line::from(Span::styled(
                EMPTY_HINT,
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let label = Style::default().fg(Color::Cyan);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Points: ", label),
                Span::raw(self.snapshot.len().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Area: ", label),
                Span::raw(format_area(self.area_m2)),
            ]),
        ];

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Point Locations",
            label.add_modifier(Modifier::BOLD),
        )));
        for (index, point) in self.snapshot.points.iter().enumerate() {
            let prefix = format!("{}. ", index + 1);
            let room = width.saturating_sub(prefix.chars().count());
            lines.push(Line::from(vec![
                Span::raw(prefix),
                Span::styled(
                    truncate(point.location.display_text(), room),
                    Self::location_style(&point.location),
                ),
            ]));
        }
        lines
    }
}

impl Widget for PointsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(2) as usize;
        Paragraph::new(self.lines(width))
            .block(Block::default().borders(Borders::ALL).title(" Polygon "))
            .render(area, buf);
    }
}
