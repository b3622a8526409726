use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Phase entries per long-break cycle.
pub const CYCLE_LENGTH: u64 = 8;

/// Text shown while no phase is active.
pub const IDLE_DISPLAY: &str = "0:00";

/// Delay requested between two countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub const WORK_MIN: u64 = 25;
pub const SHORT_BREAK_MIN: u64 = 5;
pub const LONG_BREAK_MIN: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

/// Audio/visual cue played when a phase begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    WorkStart,
    BreakStart,
}

impl Phase {
    /// Classify the phase entered at cycle counter `cycle`.
    ///
    /// Returns `None` for 0, the idle counter. The multiple-of-8 check runs
    /// before the even check so every eighth entry is a long break.
    pub fn classify(cycle: u64) -> Option<Phase> {
        if cycle == 0 {
            None
        } else if cycle % CYCLE_LENGTH == 0 {
            Some(Phase::LongBreak)
        } else if cycle % 2 == 0 {
            Some(Phase::ShortBreak)
        } else {
            Some(Phase::Work)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work!",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    pub fn cue(self) -> Cue {
        match self {
            Phase::Work => Cue::WorkStart,
            Phase::ShortBreak | Phase::LongBreak => Cue::BreakStart,
        }
    }
}

/// Fixed phase lengths, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub work_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
}

impl PhaseDurations {
    /// 25 minutes of work, 5 minute short breaks, 20 minute long breaks.
    pub fn standard() -> Self {
        Self {
            work_secs: WORK_MIN * 60,
            short_break_secs: SHORT_BREAK_MIN * 60,
            long_break_secs: LONG_BREAK_MIN * 60,
        }
    }

    /// Check that every phase has a non-zero length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, secs) in [
            ("work_secs", self.work_secs),
            ("short_break_secs", self.short_break_secs),
            ("long_break_secs", self.long_break_secs),
        ] {
            if secs == 0 {
                return Err(ValidationError::invalid(field, "must be greater than zero"));
            }
        }
        Ok(())
    }

    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::standard()
    }
}

/// Format seconds as `M:SS`.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Work sessions finished after `cycle` phase entries.
pub fn completed_work_sessions(cycle: u64) -> u64 {
    cycle / 2
}
