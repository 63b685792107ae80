use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Default)]
pub struct LatestRequestGate {
    latest: AtomicU64,
}

impl LatestRequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub fn accept<T>(&self, ticket: RequestTicket, result: T) -> Option<T> {
        self.is_current(ticket).then_some(result)
    }
}

#[derive(Debug, Default)]
pub struct ValidationSlot<T> {
    gate: LatestRequestGate,
    current: Option<T>,
}

impl<T> ValidationSlot<T> {
    pub fn new() -> Self {
        Self {
            gate: LatestRequestGate::new(),
            current: None,
        }
    }

    pub fn issue(&self) -> RequestTicket {
        self.gate.issue()
    }

    pub fn apply(&mut self, ticket: RequestTicket, result: T) -> bool {
        match self.gate.accept(ticket, result) {
            Some(result) => {
                self.current = Some(result);
                true
            }
            None => {
                debug!(ticket = ticket.0, "discarding superseded validation response");
                false
            }
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    pub delay: Duration,
}

impl Debounce {
    pub const DATASET: Debounce = Debounce {
        delay: Duration::from_secs(1),
    };
    pub const SEQSET: Debounce = Debounce {
        delay: Duration::from_secs(2),
    };

    pub fn should_fire(&self, last_input_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(last_input_at) >= self.delay
    }
}
