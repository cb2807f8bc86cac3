//! Point Store - the single source of truth for annotation state.
//!
//! The store owns the ordered vertex list, the per-vertex address state and
//! the derived polygon. Every mutation returns a tagged [`Action`] describing
//! what happened, so observers never have to infer "was this an add or a
//! move" from side channels.
//!
//! # Architecture
//!
//! ```text
//! AnnotationStore (owned, mutable)
//!     │
//!     └── SharedAnnotation (Arc<RwLock<_>> + broadcast::Sender<Snapshot>)
//!             │
//!             ├── AnnotationProvider    (pull: snapshot, area, point count)
//!             └── AnnotationBroadcaster (push: subscribe to snapshots)
//! ```
//!
//! Consumers other than the session only ever see [`Snapshot`] values, which
//! are read-only copies.
//!
//! # Address generations
//!
//! Reverse-geocoding results arrive asynchronously and out of order. Each
//! lookup is issued against a [`LookupTicket`] carrying the point's current
//! generation; [`AnnotationStore::set_location`] discards results whose
//! generation is no longer current or whose point no longer exists.

mod annotation;
mod error;
mod generation;
mod shared;
mod types;

pub use annotation::AnnotationStore;
pub use error::StoreError;
pub use generation::GenerationTracker;
pub use shared::{AnnotationBroadcaster, AnnotationProvider, SharedAnnotation};
pub use types::{Action, LocationStatus, LookupTicket, PointId, Snapshot, SnapshotPoint};
