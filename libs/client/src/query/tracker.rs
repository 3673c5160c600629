//! Stale-response guard
//!
//! Requests are not cancelled when the user moves on to another page or
//! filter. Instead each request takes a [`Ticket`] and its response is only
//! applied while that ticket is still the latest one issued.

/// Position of one request in issue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: Option<Ticket>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes every earlier one
    pub fn issue(&mut self) -> Ticket {
        let next = self.latest.map_or(1, |t| t.0 + 1);
        let ticket = Ticket(next);
        self.latest = Some(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest == Some(ticket)
    }

    pub fn latest(&self) -> Option<Ticket> {
        self.latest
    }
}
