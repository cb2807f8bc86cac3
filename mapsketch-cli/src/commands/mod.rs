//! CLI command implementations.
//!
//! - [`area`] - Polygon area for a list of points (offline)
//! - [`config`] - Configuration management (init, path, show)
//! - [`geocode`] - One-shot reverse lookup and place search
//! - [`run`] - Interactive map

pub mod area;
pub mod config;
pub mod geocode;
pub mod run;
