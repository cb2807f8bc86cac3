//! Lookup outcome type.

use crate::store::{LocationStatus, LookupTicket};

/// Result of one finished lookup, addressed by its ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    /// Ticket the lookup was issued with.
    pub ticket: LookupTicket,
    /// Display state derived from the geocoder's answer.
    pub status: LocationStatus,
}

impl LookupOutcome {
    /// Returns true if the lookup produced an address.
    pub fn is_resolved(&self) -> bool {
        matches!(self.status, LocationStatus::Resolved(_))
    }
}
