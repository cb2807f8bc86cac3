//! Interactive map screen.
//!
//! # Module Structure
//!
//! - `state` - Input handling, independent of the terminal
//! - `render` - Layout and frame rendering

mod render;
pub mod state;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

pub use render::{toggle_label, RenderContext, ScreenLayout, SIDEBAR_WIDTH};
pub use state::{InputMode, MouseKind, MouseTarget, ScreenState, UiAction};

/// Owns the terminal while the map is on screen.
///
/// Raw mode, the alternate screen and mouse capture are restored on drop.
pub struct MapScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl MapScreen {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Restore terminal to normal state.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Current screen layout.
    pub fn layout(&self) -> io::Result<ScreenLayout> {
        let size = self.terminal.size()?;
        Ok(ScreenLayout::new(Rect::new(0, 0, size.width, size.height)))
    }

    pub fn draw(&mut self, ctx: &RenderContext<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| render::render_ui(frame, ctx))?;
        Ok(())
    }

    /// Wait up to `timeout` for a terminal event.
    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

impl Drop for MapScreen {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
