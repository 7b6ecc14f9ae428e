//! Search-request coordination.
//!
//! The only async work in the system is a fixed artificial delay standing in
//! for network latency. When several searches overlap, resolution order is
//! not guaranteed, so each request carries a monotonically increasing ticket
//! and only the newest one is accepted (last-request-wins); stale responses
//! are discarded instead of clobbering fresher results.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Simulated network latency before results resolve.
    pub latency_ms: u64,
    /// Seed for the result RNG; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            latency_ms: 800,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Issues tickets for in-flight searches and remembers the newest one.
#[derive(Debug, Default)]
pub struct Sequencer {
    newest: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.newest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while no newer ticket has been issued since this one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.newest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_ticket_is_current() {
        let seq = Sequencer::new();
        let t = seq.issue();
        assert!(seq.is_current(t));
    }

    #[test]
    fn newer_ticket_supersedes_older() {
        let seq = Sequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn tickets_increase_monotonically() {
        let seq = Sequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        let c = seq.issue();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(seq.is_current(c));
    }
}
