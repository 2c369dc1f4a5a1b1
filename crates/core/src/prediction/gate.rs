//! Latest-request-wins filtering of prediction responses

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Hands out tickets for prediction requests and only lets through the
/// response of the most recent one. A slower, older request that resolves
/// late is dropped instead of overwriting a newer answer.
#[derive(Debug, Default)]
pub struct PredictionGate {
    latest: AtomicU64,
}

impl PredictionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request, superseding all earlier ones.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns `value` if `ticket` is still the latest request.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}
