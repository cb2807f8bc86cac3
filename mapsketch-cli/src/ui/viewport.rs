//! Mapping between terminal cells and map coordinates.
//!
//! The map is drawn in Web Mercator world pixels at the camera zoom. One
//! terminal cell covers [`CELL_WIDTH_PX`] × [`CELL_HEIGHT_PX`] world pixels,
//! which keeps the aspect ratio of a typical monospace glyph.
//!
//! Canvas coordinates are world pixels with `y` negated, since the ratatui
//! canvas grows upwards and the Mercator world grows downwards.

use mapsketch::coord::{self, CoordError, LatLng};
use ratatui::layout::Rect;

/// World pixels per cell, horizontally.
pub const CELL_WIDTH_PX: f64 = 8.0;

/// World pixels per cell, vertically.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Visible window onto the map for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    zoom: f64,
    center_x: f64,
    center_y: f64,
}

impl Viewport {
    /// Window of `area` centred on `center`.
    pub fn new(area: Rect, center: LatLng, zoom: f64) -> Result<Self, CoordError> {
        let (center_x, center_y) = coord::project(center, zoom)?;
        Ok(Self {
            area,
            zoom,
            center_x,
            center_y,
        })
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns true if the terminal cell lies inside the map.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// Coordinate under the centre of a terminal cell.
    ///
    /// Returns `None` for cells outside the map.
    pub fn cell_to_latlng(&self, column: u16, row: u16) -> Option<LatLng> {
        if !self.contains(column, row) {
            return None;
        }
        let (x, y) = self.cell_to_world(column, row);
        coord::unproject(x, y, self.zoom).ok()
    }

    /// Canvas position of a coordinate.
    pub fn to_canvas(&self, point: LatLng) -> Option<(f64, f64)> {
        let (x, y) = coord::project(point, self.zoom).ok()?;
        Some((x, -y))
    }

    /// Horizontal canvas bounds.
    pub fn x_bounds(&self) -> [f64; 2] {
        let half = f64::from(self.area.width) * CELL_WIDTH_PX / 2.0;
        [self.center_x - half, self.center_x + half]
    }

    /// Vertical canvas bounds.
    pub fn y_bounds(&self) -> [f64; 2] {
        let half = f64::from(self.area.height) * CELL_HEIGHT_PX / 2.0;
        [-(self.center_y + half), -(self.center_y - half)]
    }

    /// Hit radius for markers, in world pixels.
    pub fn hit_tolerance_px(&self) -> f64 {
        CELL_WIDTH_PX.max(CELL_HEIGHT_PX) / 2.0 + 1.0
    }

    /// Camera centre after shifting the window by whole cells.
    pub fn panned(&self, columns: i32, rows: i32) -> Result<LatLng, CoordError> {
        let x = self.center_x + f64::from(columns) * CELL_WIDTH_PX;
        let y = self.center_y + f64::from(rows) * CELL_HEIGHT_PX;
        coord::unproject(x, y, self.zoom)
    }

    fn cell_to_world(&self, column: u16, row: u16) -> (f64, f64) {
        let dx = f64::from(column - self.area.x) + 0.5 - f64::from(self.area.width) / 2.0;
        let dy = f64::from(row - self.area.y) + 0.5 - f64::from(self.area.height) / 2.0;
        (
            self.center_x + dx * CELL_WIDTH_PX,
            self.center_y + dy * CELL_HEIGHT_PX,
        )
    }
}
