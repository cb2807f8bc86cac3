//! Blocking alert popup.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const POPUP_WIDTH: u16 = 44;
const POPUP_HEIGHT: u16 = 6;

/// Centred message box dismissed by any key or click.
pub struct AlertPopup<'a> {
    message: &'a str,
}

impl<'a> AlertPopup<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Rectangle the popup occupies inside `area`.
    pub fn popup_area(area: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(POPUP_HEIGHT.min(area.height))])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(POPUP_WIDTH.min(area.width))])
            .flex(Flex::Center)
            .areas(row);
        popup
    }
}

impl Widget for AlertPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::popup_area(area);
        Clear.render(popup, buf);

        let text = vec![
            Line::from(self.message),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Alert ")
                    .border_style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .render(popup, buf);
    }
}
