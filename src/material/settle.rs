use std::time::{Duration, Instant};

/// Input gate for the settle interval after a material loads.
///
/// A freshly loaded reference image takes a moment to finish rendering, and
/// touches landing in that window must not count. The gate replaces a
/// sleeping timer thread with a generation-counted deadline: arming returns a
/// ticket, and only the ticket from the *latest* arm can complete the
/// re-open. A reload or a forced override bumps the generation, so a ticket
/// from a superseded exercise can never re-enable input.
#[derive(Clone, Copy, Debug)]
pub struct SettleGate {
    generation: u64,
    state: GateState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GateState {
    Open,
    Closed,
    Pending { open_at: Instant },
}

impl Default for SettleGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SettleGate {
    /// Starts closed: input stays off until a material has loaded and
    /// settled (or the host forces the gate).
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: GateState::Closed,
        }
    }

    /// Close the gate and schedule the re-open for `delay` after `now`.
    /// Returns the ticket required to complete the re-open early.
    pub fn arm(&mut self, now: Instant, delay: Duration) -> u64 {
        self.generation += 1;
        self.state = GateState::Pending {
            open_at: now + delay,
        };
        self.generation
    }

    /// Host timer callback: open the gate iff `ticket` is still the live
    /// one. Returns whether the gate opened.
    pub fn complete(&mut self, ticket: u64) -> bool {
        if ticket == self.generation && matches!(self.state, GateState::Pending { .. }) {
            self.state = GateState::Open;
            true
        } else {
            false
        }
    }

    /// Force the gate open or closed, invalidating any pending ticket.
    pub fn force(&mut self, open: bool) {
        self.generation += 1;
        self.state = if open {
            GateState::Open
        } else {
            GateState::Closed
        };
    }

    /// Poll-style check; an elapsed deadline counts as open.
    pub fn is_open(&self, now: Instant) -> bool {
        match self.state {
            GateState::Open => true,
            GateState::Closed => false,
            GateState::Pending { open_at } => now >= open_at,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/material/settle.rs"]
mod tests;
