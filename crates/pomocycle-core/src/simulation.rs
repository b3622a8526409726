//! Deterministic simulation of full session cycles.
//!
//! Runs a [`SessionScheduler`] on a [`ManualTicker`] so hours of countdown
//! finish instantly. Useful for checking the phase pattern, the checkmark
//! count and total cycle time without waiting on a real clock.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::timer::{
    completed_work_sessions, EventLog, ManualTicker, Phase, PhaseDurations, SessionScheduler,
};

/// Largest `count` accepted by [`cycle_plan`].
pub const MAX_PLAN_ENTRIES: u64 = 1_000;

/// Largest `phases` accepted by [`simulate`].
pub const MAX_SIMULATED_PHASES: u64 = 1_000;

/// One entry of the phase pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub cycle: u64,
    pub phase: Phase,
    pub duration_secs: u64,
    /// Checkmarks shown once this phase has been entered.
    pub completed_work_sessions: u64,
}

/// Phase pattern for the first `count` entries after a reset.
///
/// # Errors
///
/// Returns a validation error if `count` exceeds [`MAX_PLAN_ENTRIES`].
pub fn cycle_plan(durations: &PhaseDurations, count: u64) -> Result<Vec<PlanEntry>> {
    if count > MAX_PLAN_ENTRIES {
        return Err(ValidationError::invalid(
            "count",
            format!("must be at most {MAX_PLAN_ENTRIES}"),
        )
        .into());
    }
    let plan = (1..=count)
        .filter_map(|cycle| {
            let phase = Phase::classify(cycle)?;
            Some(PlanEntry {
                cycle,
                phase,
                duration_secs: durations.for_phase(phase),
                completed_work_sessions: completed_work_sessions(cycle),
            })
        })
        .collect();
    Ok(plan)
}

/// A phase as it actually ran in the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub cycle: u64,
    pub phase: Phase,
    pub duration_secs: u64,
    /// Ticks delivered while this phase was active, including the tick at
    /// `0:00` that advanced past it.
    pub ticks: u64,
    /// Progress the scheduler reported on entering this phase. The first
    /// phase is entered by an explicit start and reports nothing.
    pub progress_on_entry: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub phases: Vec<PhaseRecord>,
    /// Virtual seconds elapsed until the last phase completed.
    pub elapsed_secs: u64,
    pub completed_work_sessions: u64,
}

/// Start a scheduler and run it until `phases` phases have fully counted down.
///
/// # Errors
///
/// Returns a validation error if `phases` is zero or above
/// [`MAX_SIMULATED_PHASES`], or if a duration is invalid.
pub fn simulate(durations: PhaseDurations, phases: u64) -> Result<SimulationReport> {
    if phases == 0 {
        return Err(ValidationError::invalid("phases", "must be at least 1").into());
    }
    if phases > MAX_SIMULATED_PHASES {
        return Err(ValidationError::invalid(
            "phases",
            format!("must be at most {MAX_SIMULATED_PHASES}"),
        )
        .into());
    }

    let mut scheduler = SessionScheduler::new(durations, ManualTicker::new(), EventLog::new())?;
    scheduler.start();

    let mut records = vec![enter_record(&scheduler, None)];

    while scheduler.completed_cycles() <= phases {
        let Some(handle) = scheduler.ticker_mut().advance_to_next() else {
            break;
        };
        let before = scheduler.completed_cycles();
        scheduler.fire(handle);
        if let Some(current) = records.last_mut() {
            current.ticks += 1;
        }

        if scheduler.completed_cycles() != before && scheduler.completed_cycles() <= phases {
            let progress = scheduler.observer().last_progress();
            records.push(enter_record(&scheduler, progress));
        }
        scheduler.observer_mut().clear();
    }

    tracing::debug!(phases, elapsed = ?scheduler.ticker().now(), "simulation finished");

    Ok(SimulationReport {
        phases: records,
        elapsed_secs: scheduler.ticker().now().as_secs(),
        completed_work_sessions: scheduler.completed_work_sessions(),
    })
}

fn enter_record(
    scheduler: &SessionScheduler<ManualTicker, EventLog>,
    progress_on_entry: Option<u64>,
) -> PhaseRecord {
    PhaseRecord {
        cycle: scheduler.completed_cycles(),
        phase: scheduler.current_phase().unwrap_or(Phase::Work),
        duration_secs: scheduler.remaining_secs(),
        ticks: 0,
        progress_on_entry,
    }
}
