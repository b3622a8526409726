//! Session scheduler implementation.
//!
//! The scheduler is a tick-driven state machine. It owns no threads and
//! never sleeps: every delay goes through the injected [`Ticker`], and the
//! host feeds due ticks back through [`SessionScheduler::fire`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Counting(Work, D)
//! Counting(p, n>0) --tick--> Counting(p, n-1)
//! Counting(p, 0) --tick--> Counting(next, D')   (auto-advance)
//! Counting(*) --reset--> Idle
//! ```
//!
//! ## Usage
//!
//! ```
//! use pomocycle_core::timer::{EventLog, ManualTicker, PhaseDurations, SessionScheduler};
//!
//! let mut scheduler =
//!     SessionScheduler::new(PhaseDurations::standard(), ManualTicker::new(), EventLog::new())
//!         .unwrap();
//! scheduler.start();
//! while let Some(handle) = scheduler.ticker_mut().advance_to_next() {
//!     scheduler.fire(handle);
//!     if scheduler.completed_cycles() == 2 {
//!         break;
//!     }
//! }
//! assert_eq!(scheduler.completed_work_sessions(), 1);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::observer::SessionObserver;
use super::phase::{
    completed_work_sessions, format_clock, Phase, PhaseDurations, IDLE_DISPLAY, TICK_INTERVAL,
};
use super::ticker::{TickHandle, Ticker};
use crate::error::Result;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulerState {
    Idle,
    Counting { phase: Phase, remaining_secs: u64 },
}

/// Core session scheduler.
///
/// Single-threaded: the host must not call `start`, `tick`, `fire` or
/// `reset` concurrently on one instance.
#[derive(Debug)]
pub struct SessionScheduler<T: Ticker, O: SessionObserver> {
    durations: PhaseDurations,
    /// Phase entries since the last reset.
    completed_cycles: u64,
    remaining_secs: u64,
    /// Set exactly while a countdown is running.
    pending_tick: Option<TickHandle>,
    ticker: T,
    observer: O,
}

impl<T: Ticker, O: SessionObserver> SessionScheduler<T, O> {
    /// Create an idle scheduler.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any duration is zero.
    pub fn new(durations: PhaseDurations, ticker: T, observer: O) -> Result<Self> {
        durations.validate()?;
        Ok(Self {
            durations,
            completed_cycles: 0,
            remaining_secs: 0,
            pending_tick: None,
            ticker,
            observer,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        match self.current_phase() {
            None => SchedulerState::Idle,
            Some(phase) => SchedulerState::Counting {
                phase,
                remaining_secs: self.remaining_secs,
            },
        }
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn current_phase(&self) -> Option<Phase> {
        Phase::classify(self.completed_cycles)
    }

    pub fn completed_work_sessions(&self) -> u64 {
        completed_work_sessions(self.completed_cycles)
    }

    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending_tick
    }

    /// Current countdown as `M:SS`.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            cycle: self.completed_cycles,
            remaining_secs: self.remaining_secs,
            completed_work_sessions: self.completed_work_sessions(),
            display: self.display(),
            at: Utc::now(),
        }
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enter the next phase and begin counting it down.
    pub fn start(&mut self) {
        self.completed_cycles += 1;
        // Non-zero after the increment, so classification always succeeds.
        let phase = Phase::classify(self.completed_cycles).unwrap_or(Phase::Work);
        let duration_secs = self.durations.for_phase(phase);
        self.remaining_secs = duration_secs;
        self.cancel_pending();

        tracing::info!(cycle = self.completed_cycles, ?phase, duration_secs, "phase started");
        self.observer.on_phase_change(self.completed_cycles, phase, duration_secs);
        self.observer.on_cue(phase.cue());

        self.pending_tick = Some(self.ticker.schedule_after(TICK_INTERVAL));
    }

    /// Run one countdown step for the pending tick.
    ///
    /// A no-op when no countdown is running.
    pub fn tick(&mut self) {
        let Some(handle) = self.pending_tick.take() else {
            tracing::debug!("tick ignored: no countdown running");
            return;
        };
        // Already gone when fired by the ticker; called directly it must not
        // fire a second time later.
        self.ticker.cancel(handle);

        self.observer.on_display_update(&format_clock(self.remaining_secs));

        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            tracing::debug!(remaining_secs = self.remaining_secs, "tick");
            self.pending_tick = Some(self.ticker.schedule_after(TICK_INTERVAL));
            return;
        }

        self.start();
        let done = self.completed_work_sessions();
        tracing::debug!(completed_work_sessions = done, "progress");
        self.observer.on_progress_update(done);
    }

    /// Deliver a tick the ticker reported as due.
    ///
    /// Only the currently pending handle runs; a stale handle from before a
    /// cancel or reset is dropped. Returns whether the tick ran.
    pub fn fire(&mut self, handle: TickHandle) -> bool {
        if self.pending_tick != Some(handle) {
            tracing::debug!(handle = handle.id(), "stale tick dropped");
            return false;
        }
        self.tick();
        true
    }

    /// Stop counting and return to idle.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.remaining_secs = 0;
        self.completed_cycles = 0;

        tracing::info!("timer reset");
        self.observer.on_display_update(IDLE_DISPLAY);
        self.observer.on_progress_update(0);
        self.observer.on_idle();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_tick.take() {
            self.ticker.cancel(handle);
        }
    }
}
