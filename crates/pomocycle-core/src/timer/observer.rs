use chrono::Utc;

use super::phase::{Cue, Phase};
use crate::events::Event;

/// Receiver for scheduler notifications.
///
/// The scheduler knows nothing about rendering; a UI implements this and
/// draws whatever it likes.
pub trait SessionObserver {
    /// A phase began. `cycle` is the entry number since the last reset.
    fn on_phase_change(&mut self, cycle: u64, phase: Phase, duration_secs: u64);

    fn on_display_update(&mut self, text: &str);

    fn on_progress_update(&mut self, completed_work_sessions: u64);

    fn on_cue(&mut self, _cue: Cue) {}

    /// The scheduler was reset; labels go back to neutral.
    fn on_idle(&mut self) {}
}

/// Silent observer.
impl SessionObserver for () {
    fn on_phase_change(&mut self, _cycle: u64, _phase: Phase, _duration_secs: u64) {}
    fn on_display_update(&mut self, _text: &str) {}
    fn on_progress_update(&mut self, _completed_work_sessions: u64) {}
}

/// Observer that records every notification as an [`Event`].
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take everything recorded so far.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Display strings in the order they were shown.
    pub fn displays(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::DisplayUpdated { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Phases entered, with their durations.
    pub fn phases(&self) -> Vec<(Phase, u64)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::PhaseStarted {
                    phase,
                    duration_secs,
                    ..
                } => Some((*phase, *duration_secs)),
                _ => None,
            })
            .collect()
    }

    pub fn last_progress(&self) -> Option<u64> {
        self.events.iter().rev().find_map(|e| match e {
            Event::ProgressUpdated {
                completed_work_sessions,
            } => Some(*completed_work_sessions),
            _ => None,
        })
    }
}

impl SessionObserver for EventLog {
    fn on_phase_change(&mut self, cycle: u64, phase: Phase, duration_secs: u64) {
        self.events.push(Event::PhaseStarted {
            cycle,
            phase,
            duration_secs,
            at: Utc::now(),
        });
    }

    fn on_display_update(&mut self, text: &str) {
        self.events.push(Event::DisplayUpdated {
            text: text.to_string(),
        });
    }

    fn on_progress_update(&mut self, completed_work_sessions: u64) {
        self.events.push(Event::ProgressUpdated {
            completed_work_sessions,
        });
    }

    fn on_cue(&mut self, cue: Cue) {
        self.events.push(Event::CueSelected { cue });
    }

    fn on_idle(&mut self) {
        self.events.push(Event::TimerReset { at: Utc::now() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_records_in_order() {
        let mut log = EventLog::new();
        log.on_phase_change(1, Phase::Work, 1500);
        log.on_cue(Cue::WorkStart);
        log.on_display_update("25:00");
        log.on_progress_update(0);

        assert_eq!(log.len(), 4);
        assert_eq!(log.phases(), vec![(Phase::Work, 1500)]);
        assert_eq!(log.displays(), vec!["25:00"]);
        assert_eq!(log.last_progress(), Some(0));
        assert!(matches!(log.events()[1], Event::CueSelected { cue: Cue::WorkStart }));
    }

    #[test]
    fn drain_empties_log() {
        let mut log = EventLog::new();
        log.on_idle();
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn phase_started_serializes_cycle() {
        let mut log = EventLog::new();
        log.on_phase_change(8, Phase::LongBreak, 1200);
        let json = serde_json::to_value(&log.events()[0]).unwrap();
        assert_eq!(json["type"], "phase_started");
        assert_eq!(json["cycle"], 8);
        assert_eq!(json["phase"], "long_break");
        assert_eq!(json["duration_secs"], 1200);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::ProgressUpdated {
            completed_work_sessions: 3,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "progress_updated");
        assert_eq!(json["completed_work_sessions"], 3);
    }
}
