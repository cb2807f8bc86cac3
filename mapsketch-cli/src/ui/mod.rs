//! Terminal UI for mapsketch.
//!
//! A Mercator canvas on the left takes clicks and drags; the sidebar holds
//! the search field, the Start Over and layer buttons, and the point list.

pub mod screen;
pub mod viewport;
pub mod widgets;

pub use screen::{MapScreen, ScreenState};
pub use viewport::Viewport;
