//! Widgets for the map screen.
//!
//! - `MapCanvas` - Mercator canvas with the polygon, markers and search marker
//! - `SearchField`, `Button`, `PointsPanel` - Sidebar pieces
//! - `AlertPopup` - Blocking message box

mod alert;
mod format;
mod map_canvas;
mod sidebar;

pub use alert::AlertPopup;
pub use format::{format_lat, format_lng, truncate};
pub use map_canvas::MapCanvas;
pub use sidebar::{Button, PointsPanel, SearchField};
