//! # Pomocycle Core Library
//!
//! Core logic for a work/break interval timer. The CLI is a thin shell over
//! this crate: it supplies a clock and draws what the scheduler reports.
//!
//! ## Architecture
//!
//! - **Session Scheduler**: a tick-driven state machine. It alternates work,
//!   short break and long break phases in an 8-entry pattern and counts down
//!   each phase one second per tick.
//! - **Ticker**: the delay-callback capability the scheduler is driven by.
//!   [`ManualTicker`] is a virtual clock for tests and simulation.
//! - **Observer**: notifications (phase change, display text, progress) go to
//!   a [`SessionObserver`]; the core never renders anything itself.
//! - **Storage**: TOML-based presentation preferences.
//!
//! ## Key Components
//!
//! - [`SessionScheduler`]: core state machine
//! - [`Event`]: serializable notification stream
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod simulation;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use simulation::{
    cycle_plan, simulate, PhaseRecord, PlanEntry, SimulationReport, MAX_PLAN_ENTRIES,
    MAX_SIMULATED_PHASES,
};
pub use storage::Config;
pub use timer::{
    Cue, EventLog, ManualTicker, Phase, PhaseDurations, SchedulerState, SessionObserver,
    SessionScheduler, TickHandle, Ticker,
};
