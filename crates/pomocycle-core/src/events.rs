use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Cue, Phase, SchedulerState};

/// Every notification the scheduler sends to the presentation shell,
/// in a form that can be logged or printed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseStarted {
        /// Phase entries since the last reset, this one included.
        cycle: u64,
        phase: Phase,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    CueSelected {
        cue: Cue,
    },
    DisplayUpdated {
        text: String,
    },
    ProgressUpdated {
        completed_work_sessions: u64,
    },
    /// Phase label returned to the neutral idle state.
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SchedulerState,
        cycle: u64,
        remaining_secs: u64,
        completed_work_sessions: u64,
        display: String,
        at: DateTime<Utc>,
    },
}
