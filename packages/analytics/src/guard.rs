//! Stale-result protection for overlapping recomputations.
//!
//! When a selection changes faster than views are rebuilt, each rebuild
//! takes a [`Ticket`] first. Only the result carrying the latest ticket is
//! accepted; anything older is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one recomputation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Hands out increasing tickets and accepts only the latest one.
#[derive(Debug, Default)]
pub struct RecomputeGuard {
    latest: AtomicU64,
}

impl RecomputeGuard {
    /// Creates a guard that has issued no tickets.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Starts a recomputation, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the most recent one.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Returns `value` if `ticket` is current, or drops it.
    pub fn finish<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::debug!("Discarding stale result for ticket {}", ticket.0);
            None
        }
    }
}
