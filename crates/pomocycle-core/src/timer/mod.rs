mod observer;
mod phase;
mod scheduler;
mod ticker;

pub use observer::{EventLog, SessionObserver};
pub use phase::{
    completed_work_sessions, format_clock, Cue, Phase, PhaseDurations, CYCLE_LENGTH,
    IDLE_DISPLAY, LONG_BREAK_MIN, SHORT_BREAK_MIN, TICK_INTERVAL, WORK_MIN,
};
pub use scheduler::{SchedulerState, SessionScheduler};
pub use ticker::{ManualTicker, TickHandle, Ticker};
