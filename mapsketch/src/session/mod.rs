//! Annotation session: the control flow tying user input to state.
//!
//! User input (map click, marker drag, toggle, search) mutates either the
//! annotation store or the view controller. Every store change is followed by
//! a marker reconcile, and every append and every drag release issues exactly
//! one address lookup for the affected point. Completed lookups come back
//! through [`AnnotationSession::pump_lookups`] or
//! [`AnnotationSession::next_lookup`] and are written back only if they are
//! still the latest for their point.

mod error;

pub use error::SessionError;

use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::coord::LatLng;
use crate::geocode::Geocoder;
use crate::geometry;
use crate::location::LocationUpdate;
use crate::markers::{MarkerError, MarkerSet, ReconcileReport};
use crate::resolver::{AddressResolver, LookupOutcome};
use crate::store::{Action, AnnotationProvider, PointId, SharedAnnotation, Snapshot};
use crate::view::{MapLayer, SearchError, ViewConfig, ViewController};

/// One interactive annotation session.
pub struct AnnotationSession<G: Geocoder + 'static> {
    annotation: SharedAnnotation,
    markers: MarkerSet,
    view: ViewController,
    resolver: AddressResolver<G>,
    outcomes: mpsc::Receiver<LookupOutcome>,
    preview_area: Option<f64>,
}

impl<G: Geocoder + 'static> AnnotationSession<G> {
    /// Create a session whose lookups run on `runtime`.
    pub fn new(geocoder: Arc<G>, view: ViewConfig, runtime: Handle) -> Self {
        let (resolver, outcomes) = AddressResolver::new(geocoder, runtime);
        Self {
            annotation: SharedAnnotation::new(),
            markers: MarkerSet::new(),
            view: ViewController::new(view),
            resolver,
            outcomes,
            preview_area: None,
        }
    }

    /// Place a point where the map was clicked.
    pub fn click_map(&mut self, coord: LatLng) -> Result<Action, SessionError> {
        self.view.mark_user_interaction();
        let action = self.annotation.add_point(coord);
        self.sync_markers();
        if let Some(id) = action.point() {
            self.request_lookup(id)?;
        }
        Ok(action)
    }

    pub fn hover_marker(&mut self, id: PointId) -> Result<(), SessionError> {
        Ok(self.markers.hover(id)?)
    }

    pub fn unhover_marker(&mut self, id: PointId) -> Result<(), SessionError> {
        Ok(self.markers.unhover(id)?)
    }

    /// Start dragging the marker for `id`.
    pub fn begin_drag(&mut self, id: PointId) -> Result<(), SessionError> {
        self.markers.begin_drag(id)?;
        self.preview_area = Some(self.annotation.area());
        Ok(())
    }

    /// Live drag: moves the marker and returns the preview area.
    ///
    /// The store is not touched until [`end_drag`](Self::end_drag).
    pub fn drag_marker(&mut self, id: PointId, coord: LatLng) -> Result<f64, SessionError> {
        self.markers.drag_to(id, coord)?;
        let area = geometry::polygon_area(&self.markers.positions());
        self.preview_area = Some(area);
        Ok(area)
    }

    /// Release a drag: commits the coordinate and issues one lookup.
    pub fn end_drag(&mut self, id: PointId) -> Result<Action, SessionError> {
        let (_, coord) = self.markers.end_drag(id)?;
        self.preview_area = None;

        let index = self
            .annotation
            .index_of(id)
            .ok_or(MarkerError::UnknownMarker(id))?;
        let action = self.annotation.move_point(index, coord)?;
        self.sync_markers();
        self.request_lookup(id)?;
        Ok(action)
    }

    /// Remove every point, marker and pending location.
    pub fn reset(&mut self) -> Action {
        let action = self.annotation.reset();
        self.preview_area = None;
        self.sync_markers();
        info!("Annotation reset");
        action
    }

    pub fn toggle_satellite(&mut self) -> MapLayer {
        self.view.toggle_satellite()
    }

    /// Search for a place by name and centre on it.
    ///
    /// A blank query does nothing and returns `Ok(None)`.
    pub async fn search(&mut self, query: &str) -> Result<Option<LatLng>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let found = self.resolver.geocoder().search(query).await;
        match found {
            Ok(Some(location)) => {
                self.view.apply_search_result(location, Instant::now());
                Ok(Some(location))
            }
            Ok(None) => {
                info!(query, "Search returned no location");
                Err(SearchError::NotFound {
                    query: query.to_string(),
                })
            }
            Err(e) => {
                error!(query, error = %e, "Search failed");
                Err(SearchError::Geocoder(e))
            }
        }
    }

    /// Feed one device-location update. Returns true if the camera moved.
    pub fn device_location(&mut self, update: LocationUpdate) -> bool {
        match update {
            LocationUpdate::Position(position) => self.view.apply_device_location(position),
            LocationUpdate::Error(message) => {
                error!(error = %message, "Geolocation error");
                false
            }
        }
    }

    /// Apply every lookup outcome that has already arrived.
    ///
    /// Returns the number of outcomes written to the store.
    pub fn pump_lookups(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcomes.try_recv() {
            if self.apply_outcome(outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next lookup outcome and apply it.
    ///
    /// Returns whether it was accepted, or `None` if no lookup can arrive.
    pub async fn next_lookup(&mut self) -> Option<bool> {
        let outcome = self.outcomes.recv().await?;
        Some(self.apply_outcome(outcome))
    }

    /// Advance time-based view state. Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.view.expire_transient(now)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.annotation.snapshot()
    }

    /// Shared handle for read-only consumers and subscribers.
    pub fn annotation(&self) -> &SharedAnnotation {
        &self.annotation
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Mutable marker access for render-side bookkeeping (drop animations).
    pub fn markers_mut(&mut self) -> &mut MarkerSet {
        &mut self.markers
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewController {
        &mut self.view
    }

    /// Area of the live drag preview, while a drag is in progress.
    pub fn preview_area(&self) -> Option<f64> {
        self.preview_area
    }

    /// Area to display: the drag preview if dragging, else the committed one.
    pub fn display_area(&self) -> f64 {
        self.preview_area.unwrap_or_else(|| self.annotation.area())
    }

    /// Total lookups issued in this session.
    pub fn lookups_issued(&self) -> u64 {
        self.resolver.issued()
    }

    fn request_lookup(&mut self, id: PointId) -> Result<(), SessionError> {
        let ticket = self.annotation.begin_lookup(id)?;
        self.resolver.resolve(ticket);
        Ok(())
    }

    fn apply_outcome(&mut self, outcome: LookupOutcome) -> bool {
        let LookupOutcome { ticket, status } = outcome;
        let accepted = self
            .annotation
            .set_location(ticket.id, ticket.generation, status);
        if accepted {
            self.sync_markers();
        } else {
            debug!(id = %ticket.id, generation = ticket.generation, "Stale lookup discarded");
        }
        accepted
    }

    fn sync_markers(&mut self) -> ReconcileReport {
        let snapshot = self.annotation.snapshot();
        self.markers.reconcile(&snapshot.points, snapshot.last_action)
    }
}
