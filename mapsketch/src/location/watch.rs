//! Scoped position-watch subscription.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle to a running position watch.
///
/// The watch stops when the handle is cleared or dropped.
#[derive(Debug)]
pub struct LocationWatch {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl LocationWatch {
    /// Wrap a spawned watch task and the token that stops it.
    pub fn new(cancel: CancellationToken, handle: JoinHandle<()>) -> Self {
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Stop the watch and wait for its task to finish.
    pub async fn clear(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        debug!("Location watch cleared");
    }
}

impl Drop for LocationWatch {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
