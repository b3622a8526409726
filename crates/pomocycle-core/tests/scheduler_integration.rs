//! Integration tests for the session scheduler driven by a virtual clock.

use std::time::Duration;

use pomocycle_core::{
    Event, EventLog, ManualTicker, Phase, PhaseDurations, SchedulerState, SessionScheduler,
};

type Scheduler = SessionScheduler<ManualTicker, EventLog>;

fn scheduler(durations: PhaseDurations) -> Scheduler {
    SessionScheduler::new(durations, ManualTicker::new(), EventLog::new()).unwrap()
}

fn small() -> PhaseDurations {
    PhaseDurations {
        work_secs: 5,
        short_break_secs: 2,
        long_break_secs: 3,
    }
}

/// Deliver due ticks until the cycle counter reaches `cycle`.
fn run_until_cycle(s: &mut Scheduler, cycle: u64) {
    while s.completed_cycles() < cycle {
        let handle = s
            .ticker_mut()
            .advance_to_next()
            .expect("a countdown is always pending while counting");
        assert!(s.fire(handle));
        assert!(s.ticker().pending_count() <= 1);
    }
}

#[test]
fn sixteen_entries_follow_pattern() {
    use Phase::*;
    let expected = [
        Work, ShortBreak, Work, ShortBreak, Work, ShortBreak, Work, LongBreak,
        Work, ShortBreak, Work, ShortBreak, Work, ShortBreak, Work, LongBreak,
    ];

    let mut s = scheduler(small());
    s.start();
    run_until_cycle(&mut s, 16);

    let phases: Vec<Phase> = s.observer().phases().into_iter().map(|(p, _)| p).collect();
    assert_eq!(phases, expected);
}

#[test]
fn external_starts_follow_pattern() {
    let mut s = scheduler(small());
    for n in 1..=16u64 {
        s.start();
        assert_eq!(s.current_phase(), Phase::classify(n));
        assert_eq!(s.ticker().pending_count(), 1);
    }
}

#[test]
fn eighth_entry_is_long_break_with_four_checkmarks() {
    let mut s = scheduler(PhaseDurations::standard());
    s.start();
    run_until_cycle(&mut s, 8);

    assert_eq!(s.current_phase(), Some(Phase::LongBreak));
    assert_eq!(s.remaining_secs(), 1200);
    assert_eq!(s.observer().phases().last(), Some(&(Phase::LongBreak, 1200)));
    assert_eq!(s.observer().last_progress(), Some(4));
    assert_eq!(s.completed_work_sessions(), 4);
}

#[test]
fn progress_rises_on_each_break_entry() {
    let mut s = scheduler(small());
    s.start();
    let mut progress = Vec::new();
    for cycle in 2..=16 {
        run_until_cycle(&mut s, cycle);
        progress.push(s.observer().last_progress().unwrap());
    }
    assert_eq!(progress, vec![1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8]);
}

#[test]
fn countdown_is_strictly_decreasing() {
    let durations = small();
    let mut s = scheduler(durations);
    s.start();

    let mut seen = vec![s.remaining_secs()];
    while s.completed_cycles() == 1 {
        let h = s.ticker_mut().advance_to_next().unwrap();
        s.fire(h);
        if s.completed_cycles() == 1 {
            seen.push(s.remaining_secs());
        }
    }
    assert_eq!(seen, vec![5, 4, 3, 2, 1, 0]);
    assert_eq!(
        s.observer().displays(),
        vec!["0:05", "0:04", "0:03", "0:02", "0:01", "0:00"]
    );
    assert_eq!(s.ticker().now(), Duration::from_secs(6));
}

#[test]
fn reset_mid_countdown_ignores_queued_tick() {
    let mut s = scheduler(PhaseDurations::standard());
    s.start();
    for _ in 0..10 {
        let h = s.ticker_mut().advance_to_next().unwrap();
        s.fire(h);
    }
    assert_eq!(s.remaining_secs(), 1490);

    // The host already pulled the next tick off its queue when reset lands.
    let queued = s.ticker_mut().advance_to_next().unwrap();
    s.reset();
    assert_eq!(s.remaining_secs(), 0);
    assert_eq!(s.completed_cycles(), 0);

    let events_before = s.observer().len();
    assert!(!s.fire(queued));
    assert_eq!(s.state(), SchedulerState::Idle);
    assert_eq!(s.observer().len(), events_before);
    assert!(s.ticker_mut().advance(Duration::from_secs(60)).is_empty());
}

#[test]
fn reset_twice_matches_reset_once() {
    let mut once = scheduler(small());
    once.start();
    once.reset();

    let mut twice = scheduler(small());
    twice.start();
    twice.reset();
    twice.reset();

    assert_eq!(once.state(), twice.state());
    assert_eq!(once.completed_cycles(), twice.completed_cycles());
    assert_eq!(once.remaining_secs(), twice.remaining_secs());
    assert_eq!(once.pending_tick(), twice.pending_tick());
    assert_eq!(once.display(), twice.display());
    assert_eq!(once.ticker().pending_count(), twice.ticker().pending_count());
}

#[test]
fn start_after_reset_begins_with_work() {
    let mut s = scheduler(small());
    s.start();
    run_until_cycle(&mut s, 4);
    s.reset();
    s.start();
    assert_eq!(s.completed_cycles(), 1);
    assert_eq!(s.current_phase(), Some(Phase::Work));
    assert_eq!(s.remaining_secs(), 5);
}

#[test]
fn direct_tick_does_not_leave_second_pending_tick() {
    let mut s = scheduler(small());
    s.start();
    s.tick();
    assert_eq!(s.ticker().pending_count(), 1);
    assert_eq!(s.remaining_secs(), 4);
}

#[test]
fn reset_notifies_idle_display() {
    let mut s = scheduler(small());
    s.start();
    s.observer_mut().clear();
    s.reset();

    let events = s.observer().events();
    assert!(matches!(&events[0], Event::DisplayUpdated { text } if text == "0:00"));
    assert!(matches!(events[1], Event::ProgressUpdated { completed_work_sessions: 0 }));
    assert!(matches!(events[2], Event::TimerReset { .. }));
}

#[test]
fn phase_started_carries_cycle_number() {
    let mut s = scheduler(PhaseDurations::standard());
    s.start();
    let first = serde_json::to_value(&s.observer().events()[0]).unwrap();
    assert_eq!(first["type"], "phase_started");
    assert_eq!(first["cycle"], 1);
    assert_eq!(first["duration_secs"], 1500);

    s.start();
    let cycles: Vec<u64> = s
        .observer()
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::PhaseStarted { cycle, .. } => Some(*cycle),
            _ => None,
        })
        .collect();
    assert_eq!(cycles, vec![1, 2]);

    s.reset();
    s.observer_mut().clear();
    s.start();
    assert!(matches!(
        s.observer().events()[0],
        Event::PhaseStarted { cycle: 1, phase: Phase::Work, .. }
    ));
}

mod properties {
    use super::*;
    use pomocycle_core::timer::format_clock;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn classification_depends_only_on_counter(n in 1u64..10_000) {
            let mut s = SessionScheduler::new(small(), ManualTicker::new(), ()).unwrap();
            for _ in 0..n {
                s.start();
            }
            prop_assert_eq!(s.current_phase(), Phase::classify(n));
            prop_assert_eq!(s.remaining_secs(), small().for_phase(Phase::classify(n).unwrap()));
            prop_assert_eq!(s.ticker().pending_count(), 1);
        }

        #[test]
        fn clock_format_roundtrips(secs in 0u64..100_000) {
            let text = format_clock(secs);
            let (m, rest) = text.split_once(':').unwrap();
            prop_assert_eq!(rest.len(), 2);
            let m: u64 = m.parse().unwrap();
            let s: u64 = rest.parse().unwrap();
            prop_assert!(s < 60);
            prop_assert_eq!(m * 60 + s, secs);
        }

        #[test]
        fn phase_takes_duration_decrements(work in 1u64..200) {
            let durations = PhaseDurations { work_secs: work, ..small() };
            let mut s = SessionScheduler::new(durations, ManualTicker::new(), ()).unwrap();
            s.start();
            let mut ticks = 0u64;
            while s.completed_cycles() == 1 {
                let h = s.ticker_mut().advance_to_next().unwrap();
                let before = s.remaining_secs();
                s.fire(h);
                ticks += 1;
                if s.completed_cycles() == 1 {
                    prop_assert_eq!(s.remaining_secs(), before - 1);
                }
            }
            prop_assert_eq!(ticks, work + 1);
        }
    }
}
