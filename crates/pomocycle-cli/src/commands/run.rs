//! Interactive countdown.
//!
//! A single-threaded tokio loop plays the host event loop: it sleeps until
//! the next tick deadline, reads commands from stdin, and serializes every
//! call into the scheduler.

use clap::Args;
use pomocycle_core::{Config, PhaseDurations, SessionScheduler};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use crate::render::TerminalObserver;
use crate::ticker::TokioTicker;

type Scheduler = SessionScheduler<TokioTicker, TerminalObserver>;

#[derive(Args)]
pub struct RunArgs {
    /// Start the first work phase immediately
    #[arg(long)]
    start: bool,
    /// Print every notification as a JSON line
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    Reset,
    Status,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "s" | "start" => Some(Command::Start),
            "r" | "reset" => Some(Command::Reset),
            "status" => Some(Command::Status),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(event_loop(args))
}

async fn event_loop(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let observer = TerminalObserver::new(config, args.json);
    let mut scheduler =
        SessionScheduler::new(PhaseDurations::standard(), TokioTicker::new(), observer)?;

    if !args.json {
        println!("commands: start | reset | status | quit");
    }
    if args.start {
        scheduler.start();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        if !stdin_open && scheduler.pending_tick().is_none() {
            break;
        }
        let deadline = scheduler.ticker().next_deadline();

        tokio::select! {
            _ = sleep_until(deadline) => {
                for handle in scheduler.ticker_mut().take_due(Instant::now()) {
                    scheduler.fire(handle);
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => {
                        if handle_line(&mut scheduler, &line, args.json)? {
                            break;
                        }
                    }
                    None => {
                        tracing::debug!("stdin closed");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    scheduler.observer().newline();
    Ok(())
}

/// Apply one stdin command. Returns `true` when the loop should stop.
fn handle_line(
    scheduler: &mut Scheduler,
    line: &str,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    if line.trim().is_empty() {
        return Ok(false);
    }
    match Command::parse(line) {
        Some(Command::Start) => scheduler.start(),
        Some(Command::Reset) => scheduler.reset(),
        Some(Command::Status) => {
            let snapshot = scheduler.snapshot();
            if json {
                println!("{}", serde_json::to_string(&snapshot)?);
            } else {
                scheduler.observer().newline();
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
        }
        Some(Command::Quit) => return Ok(true),
        None => {
            tracing::warn!(input = line.trim(), "unknown command");
            if !json {
                scheduler.observer().newline();
                println!("unknown command: {}", line.trim());
            }
        }
    }
    Ok(false)
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
