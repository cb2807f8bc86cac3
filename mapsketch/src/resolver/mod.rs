//! Address Resolver - asynchronous per-point reverse geocoding.
//!
//! Each lookup is fire-and-forget: the resolver spawns one task per
//! [`LookupTicket`], converts whatever the geocoder returns into a
//! [`LocationStatus`] and sends a [`LookupOutcome`] back on an mpsc channel.
//! There is no cancellation, deduplication or coalescing.
//!
//! # Architecture
//!
//! ```text
//! AnnotationStore::begin_lookup ──► LookupTicket
//!                                       │
//!                       AddressResolver::resolve (tokio::spawn)
//!                                       │
//!                                  Geocoder::reverse
//!                                       │
//!                     mpsc::Sender<LookupOutcome> ──► session
//!                                       │
//!                     AnnotationStore::set_location (generation check)
//! ```
//!
//! Errors never escape a lookup task. A failed lookup becomes
//! [`LocationStatus::Failed`]; a lookup that never returns leaves the point
//! pending (no timeout is imposed here beyond the HTTP client's own).

mod outcome;

pub use outcome::LookupOutcome;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::geocode::Geocoder;
use crate::store::{LocationStatus, LookupTicket};

/// Default capacity of the outcome channel.
pub const DEFAULT_OUTCOME_CHANNEL_CAPACITY: usize = 64;

/// Spawns reverse-geocoding lookups and reports their outcomes.
pub struct AddressResolver<G: Geocoder + 'static> {
    geocoder: Arc<G>,
    runtime: Handle,
    outcome_tx: mpsc::Sender<LookupOutcome>,
    issued: Arc<AtomicU64>,
}

impl<G: Geocoder + 'static> AddressResolver<G> {
    /// Create a resolver spawning onto `runtime`.
    ///
    /// Returns the resolver and the receiving end for outcomes.
    pub fn new(geocoder: Arc<G>, runtime: Handle) -> (Self, mpsc::Receiver<LookupOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::channel(DEFAULT_OUTCOME_CHANNEL_CAPACITY);
        let resolver = Self {
            geocoder,
            runtime,
            outcome_tx,
            issued: Arc::new(AtomicU64::new(0)),
        };
        (resolver, outcome_rx)
    }

    /// Start one lookup for `ticket`.
    pub fn resolve(&self, ticket: LookupTicket) -> JoinHandle<()> {
        self.issued.fetch_add(1, Ordering::Relaxed);

        let geocoder = Arc::clone(&self.geocoder);
        let outcome_tx = self.outcome_tx.clone();

        tracing::debug!(
            id = %ticket.id,
            index = ticket.index,
            generation = ticket.generation,
            "Address lookup issued"
        );

        self.runtime.spawn(async move {
            let status = lookup(geocoder.as_ref(), &ticket).await;
            if outcome_tx.send(LookupOutcome { ticket, status }).await.is_err() {
                tracing::debug!(id = %ticket.id, "Outcome channel closed, dropping result");
            }
        })
    }

    /// Total lookups issued by this resolver.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }

    /// The geocoder used for lookups.
    pub fn geocoder(&self) -> &Arc<G> {
        &self.geocoder
    }
}

/// Run one reverse lookup, converting every failure into display state.
pub async fn lookup<G: Geocoder>(geocoder: &G, ticket: &LookupTicket) -> LocationStatus {
    match geocoder.reverse(ticket.coord).await {
        Ok(Some(address)) => LocationStatus::Resolved(address),
        Ok(None) => LocationStatus::NotFound,
        Err(e) => {
            tracing::warn!(
                id = %ticket.id,
                index = ticket.index,
                geocoder = geocoder.name(),
                error = %e,
                "Geocoding failed"
            );
            LocationStatus::Failed
        }
    }
}
