//! Camera state and the rules that move it.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use super::style::{MapLayer, StyleRule};
use crate::coord::{LatLng, MAX_ZOOM, MIN_ZOOM};
use crate::geocode::GeocodeError;

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 20.0;

/// Zoom level applied to a search result.
pub const SEARCH_ZOOM: f64 = 15.0;

/// How long the search result marker stays on the map.
pub const TRANSIENT_MARKER_TTL: Duration = Duration::from_millis(3000);

/// Alert shown when a search does not produce a location.
pub const NOT_FOUND_ALERT: &str = "Location not found. Please try a different search.";

/// Search failures. Every variant surfaces as the same blocking alert.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("{}", NOT_FOUND_ALERT)]
    NotFound { query: String },

    #[error("{}", NOT_FOUND_ALERT)]
    Geocoder(#[from] GeocodeError),
}

impl SearchError {
    /// Text for the blocking alert.
    pub fn alert_text(&self) -> &'static str {
        NOT_FOUND_ALERT
    }
}

/// Camera settings the controller starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    pub default_center: LatLng,
    pub default_zoom: f64,
    pub search_zoom: f64,
    pub satellite: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_center: LatLng::default(),
            default_zoom: DEFAULT_ZOOM,
            search_zoom: SEARCH_ZOOM,
            satellite: false,
        }
    }
}

/// Camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom: f64,
    pub is_satellite: bool,
    /// Once set, device location no longer moves the camera.
    pub is_initial_center_applied: bool,
}

/// Search result marker that removes itself after [`TRANSIENT_MARKER_TTL`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientMarker {
    pub position: LatLng,
    pub expires_at: Instant,
}

/// Owns the [`ViewState`] and the transient search marker.
#[derive(Debug)]
pub struct ViewController {
    state: ViewState,
    search_zoom: f64,
    transient: Option<TransientMarker>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl ViewController {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            state: ViewState {
                center: config.default_center,
                zoom: config.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM),
                is_satellite: config.satellite,
                is_initial_center_applied: false,
            },
            search_zoom: config.search_zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            transient: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Active base layer.
    pub fn layer(&self) -> MapLayer {
        if self.state.is_satellite {
            MapLayer::Satellite
        } else {
            MapLayer::Roadmap
        }
    }

    /// Style table for the active layer.
    pub fn styles(&self) -> &'static [StyleRule] {
        self.layer().styles()
    }

    /// Swaps between standard and satellite. Touches nothing but the layer.
    pub fn toggle_satellite(&mut self) -> MapLayer {
        self.state.is_satellite = !self.state.is_satellite;
        let layer = self.layer();
        info!(layer = layer.id(), "Map layer changed");
        layer
    }

    /// Recentres on a device location while the latch is open.
    ///
    /// Returns true if the camera moved.
    pub fn apply_device_location(&mut self, location: LatLng) -> bool {
        if self.state.is_initial_center_applied {
            return false;
        }
        self.state.center = location;
        self.state.is_initial_center_applied = true;
        info!(lat = location.lat, lng = location.lng, "Centred on device location");
        true
    }

    /// Closes the initial-centre latch after a user interaction.
    pub fn mark_user_interaction(&mut self) {
        if !self.state.is_initial_center_applied {
            debug!("Initial centre latch closed by user interaction");
            self.state.is_initial_center_applied = true;
        }
    }

    /// Centres on a search result and drops a transient marker there.
    pub fn apply_search_result(&mut self, location: LatLng, now: Instant) {
        self.state.center = location;
        self.state.zoom = self.search_zoom;
        self.state.is_initial_center_applied = true;
        self.transient = Some(TransientMarker {
            position: location,
            expires_at: now + TRANSIENT_MARKER_TTL,
        });
        info!(lat = location.lat, lng = location.lng, "Centred on search result");
    }

    /// Removes the transient marker once it has expired.
    ///
    /// Returns true if a marker was removed.
    pub fn expire_transient(&mut self, now: Instant) -> bool {
        match self.transient {
            Some(marker) if now >= marker.expires_at => {
                self.transient = None;
                true
            }
            _ => false,
        }
    }

    pub fn transient(&self) -> Option<&TransientMarker> {
        self.transient.as_ref()
    }

    /// Moves the camera without touching the latch.
    pub fn set_center(&mut self, center: LatLng) {
        self.state.center = center;
    }

    /// Changes zoom by `delta`, clamped to the valid range.
    pub fn zoom_by(&mut self, delta: f64) -> f64 {
        self.state.zoom = (self.state.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        self.state.zoom
    }
}
