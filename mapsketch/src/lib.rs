//! mapsketch - polygon sketching and address lookup on a map
//!
//! Click points on a map, get the polygon they enclose with its spherical
//! area, and see a reverse-geocoded address for every point. The camera can
//! switch between standard and satellite styles and jump to a place found by
//! name.
//!
//! # High-Level API
//!
//! [`session::AnnotationSession`] wires everything together:
//!
//! ```ignore
//! use std::sync::Arc;
//! use mapsketch::coord::LatLng;
//! use mapsketch::geocode::{GeocoderConfig, GoogleGeocoder, ReqwestClient};
//! use mapsketch::session::AnnotationSession;
//! use mapsketch::view::ViewConfig;
//!
//! let geocoder = GoogleGeocoder::new(ReqwestClient::new()?, GeocoderConfig::with_api_key(key));
//! let mut session = AnnotationSession::new(
//!     Arc::new(geocoder),
//!     ViewConfig::default(),
//!     tokio::runtime::Handle::current(),
//! );
//!
//! session.click_map(LatLng::new(0.0, 0.0)?)?;
//! session.next_lookup().await;
//! println!("{}", session.snapshot().area_m2);
//! ```

pub mod config;
pub mod coord;
pub mod geocode;
pub mod geometry;
pub mod location;
pub mod logging;
pub mod markers;
pub mod resolver;
pub mod session;
pub mod store;
pub mod view;

/// Library version, from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
