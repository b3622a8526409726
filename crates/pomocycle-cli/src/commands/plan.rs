use clap::Args;
use pomocycle_core::timer::format_clock;
use pomocycle_core::{cycle_plan, Config, PhaseDurations, MAX_PLAN_ENTRIES};

#[derive(Args)]
pub struct PlanArgs {
    /// Number of phase entries to list
    #[arg(
        long,
        default_value = "16",
        value_parser = clap::value_parser!(u64).range(1..=MAX_PLAN_ENTRIES)
    )]
    count: u64,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let plan = cycle_plan(&PhaseDurations::standard(), args.count)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let checkmark = Config::load_or_default().display.checkmark;
    for entry in plan {
        println!(
            "{:>3}  {:<12}{:>6}  {}",
            entry.cycle,
            entry.phase.label(),
            format_clock(entry.duration_secs),
            checkmark.repeat(entry.completed_work_sessions as usize),
        );
    }
    Ok(())
}
