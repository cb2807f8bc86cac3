//! View controller: camera, base layer and transient search marker.
//!
//! The camera starts at a configured default and is recentred on the first
//! device location only. Any user interaction (placing a point, a successful
//! search) closes that one-shot latch as well, so a late location fix never
//! yanks the camera away from where the user is working.

mod controller;
mod style;

pub use controller::{
    SearchError, TransientMarker, ViewConfig, ViewController, ViewState, DEFAULT_ZOOM,
    NOT_FOUND_ALERT, SEARCH_ZOOM, TRANSIENT_MARKER_TTL,
};
pub use style::{MapLayer, StyleRule, Styler, SATELLITE_STYLES, STANDARD_STYLES};
