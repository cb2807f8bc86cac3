use thiserror::Error;

use crate::markers::MarkerError;
use crate::store::StoreError;

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Marker(#[from] MarkerError),
}
