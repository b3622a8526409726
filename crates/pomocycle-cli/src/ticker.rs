//! Wall-clock ticker for the interactive loop.
//!
//! Holds deadlines only; the event loop sleeps until [`TokioTicker::next_deadline`]
//! and then hands [`TokioTicker::take_due`] to the scheduler.

use std::time::Duration;

use pomocycle_core::{TickHandle, Ticker};
use tokio::time::Instant;

#[derive(Debug, Default)]
pub struct TokioTicker {
    next_id: u64,
    deadlines: Vec<(Instant, TickHandle)>,
}

impl TokioTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().map(|(at, _)| *at).min()
    }

    /// Remove and return every tick due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TickHandle> {
        let mut due: Vec<(Instant, TickHandle)> = Vec::new();
        self.deadlines.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, h)| h).collect()
    }
}

impl Ticker for TokioTicker {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::from_raw(self.next_id);
        self.deadlines.push((Instant::now() + delay, handle));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.deadlines.retain(|(_, h)| *h != handle);
    }
}
