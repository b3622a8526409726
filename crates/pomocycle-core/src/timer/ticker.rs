//! Delay-callback capability the scheduler runs on.
//!
//! The scheduler never sleeps or spawns. It asks a [`Ticker`] for a tick
//! after a delay and gets back a [`TickHandle`]. When the delay elapses the
//! host hands that handle to `SessionScheduler::fire`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Opaque handle to one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

pub trait Ticker {
    /// Request a tick after `delay`.
    fn schedule_after(&mut self, delay: Duration) -> TickHandle;

    /// Drop a scheduled tick. Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Deterministic ticker over a virtual clock.
///
/// Nothing fires on its own: call [`ManualTicker::advance`] or
/// [`ManualTicker::advance_to_next`] and feed the returned handles to the
/// scheduler.
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    now: Duration,
    next_id: u64,
    /// Sorted by deadline, then by handle.
    queue: Vec<(Duration, TickHandle)>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> Vec<TickHandle> {
        self.queue.iter().map(|(_, h)| *h).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock forward by `by` and return every tick that came due,
    /// earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<TickHandle> {
        self.now += by;
        let split = self.queue.partition_point(|(at, _)| *at <= self.now);
        self.queue.drain(..split).map(|(_, h)| h).collect()
    }

    /// Jump straight to the earliest pending deadline and return its tick.
    pub fn advance_to_next(&mut self) -> Option<TickHandle> {
        if self.queue.is_empty() {
            return None;
        }
        let (at, handle) = self.queue.remove(0);
        self.now = self.now.max(at);
        Some(handle)
    }
}

impl Ticker for ManualTicker {
    fn schedule_after(&mut self, delay: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let entry = (self.now + delay, handle);
        let pos = self.queue.partition_point(|e| *e <= entry);
        self.queue.insert(pos, entry);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.queue.retain(|(_, h)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn advance_returns_due_ticks_in_order() {
        let mut t = ManualTicker::new();
        let late = t.schedule_after(3 * SEC);
        let early = t.schedule_after(SEC);
        assert_eq!(t.advance(SEC), vec![early]);
        assert_eq!(t.pending(), vec![late]);
        assert!(t.advance(SEC).is_empty());
        assert_eq!(t.advance(SEC), vec![late]);
        assert_eq!(t.now(), 3 * SEC);
    }

    #[test]
    fn cancelled_tick_never_fires() {
        let mut t = ManualTicker::new();
        let h = t.schedule_after(SEC);
        t.cancel(h);
        assert!(t.advance(10 * SEC).is_empty());
        assert_eq!(t.pending_count(), 0);
    }

    #[test]
    fn cancel_unknown_handle_is_ignored() {
        let mut t = ManualTicker::new();
        let h = t.schedule_after(SEC);
        t.cancel(TickHandle::from_raw(999));
        assert_eq!(t.pending(), vec![h]);
    }

    #[test]
    fn advance_to_next_moves_clock() {
        let mut t = ManualTicker::new();
        let h = t.schedule_after(5 * SEC);
        assert_eq!(t.advance_to_next(), Some(h));
        assert_eq!(t.now(), 5 * SEC);
        assert_eq!(t.advance_to_next(), None);
    }

    #[test]
    fn handles_are_unique() {
        let mut t = ManualTicker::new();
        let a = t.schedule_after(SEC);
        let b = t.schedule_after(SEC);
        assert_ne!(a, b);
        assert!(a < b);
    }
}
