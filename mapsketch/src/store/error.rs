//! Error types for point store operations.

use thiserror::Error;

use super::types::PointId;

/// Errors that can occur when mutating the point store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Index does not refer to an existing point.
    #[error("Point index {index} out of range (point count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Point id is not (or no longer) in the store.
    #[error("Unknown point {0}")]
    UnknownPoint(PointId),
}
