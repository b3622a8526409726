use clap::Args;
use pomocycle_core::timer::format_clock;
use pomocycle_core::{simulate, PhaseDurations, MAX_SIMULATED_PHASES};

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of phases to count down
    #[arg(
        long,
        default_value = "8",
        value_parser = clap::value_parser!(u64).range(1..=MAX_SIMULATED_PHASES)
    )]
    phases: u64,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let report = simulate(PhaseDurations::standard(), args.phases)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for record in &report.phases {
        println!(
            "{:>3}  {:<12}{:>6}  {} ticks",
            record.cycle,
            record.phase.label(),
            format_clock(record.duration_secs),
            record.ticks,
        );
    }
    println!(
        "elapsed {}  completed work sessions {}",
        format_clock(report.elapsed_secs),
        report.completed_work_sessions
    );
    Ok(())
}
