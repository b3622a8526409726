use std::io::Write;

use pomocycle_core::timer::{format_clock, IDLE_DISPLAY};
use pomocycle_core::{Config, Cue, EventLog, Phase, SessionObserver};

const IDLE_LABEL: &str = "Timer";

/// Terminal signal for a cue: one bell when work starts, two for a break.
fn bell(cue: Cue) -> &'static str {
    match cue {
        Cue::WorkStart => "\x07",
        Cue::BreakStart => "\x07\x07",
    }
}

/// Draws scheduler notifications on the terminal.
///
/// Text mode rewrites a single status line in place; JSON mode prints one
/// event per line.
pub struct TerminalObserver {
    config: Config,
    json: bool,
    label: &'static str,
    clock: String,
    checkmarks: String,
    log: EventLog,
}

impl TerminalObserver {
    pub fn new(config: Config, json: bool) -> Self {
        Self {
            config,
            json,
            label: IDLE_LABEL,
            clock: IDLE_DISPLAY.to_string(),
            checkmarks: String::new(),
            log: EventLog::new(),
        }
    }

    /// The status line as currently drawn.
    pub fn status_line(&self) -> String {
        let mut line = String::new();
        if self.config.display.show_labels {
            line.push_str(&format!("{:<12}", self.label));
        }
        line.push_str(&format!("{:>6}", self.clock));
        if !self.checkmarks.is_empty() {
            line.push_str("  ");
            line.push_str(&self.checkmarks);
        }
        line
    }

    fn redraw(&self) {
        if self.json {
            return;
        }
        print!("\r\x1b[2K{}", self.status_line());
        let _ = std::io::stdout().flush();
    }

    fn flush_json(&mut self) {
        let events = self.log.drain();
        if !self.json {
            return;
        }
        for event in events {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "failed to encode event"),
            }
        }
    }

    /// Move off the status line before other output.
    pub fn newline(&self) {
        if !self.json {
            println!();
        }
    }
}

impl SessionObserver for TerminalObserver {
    fn on_phase_change(&mut self, cycle: u64, phase: Phase, duration_secs: u64) {
        self.label = phase.label();
        self.clock = format_clock(duration_secs);
        self.log.on_phase_change(cycle, phase, duration_secs);
        self.flush_json();
        self.redraw();
    }

    fn on_display_update(&mut self, text: &str) {
        self.clock = text.to_string();
        self.log.on_display_update(text);
        self.flush_json();
        self.redraw();
    }

    fn on_progress_update(&mut self, completed_work_sessions: u64) {
        self.checkmarks = self
            .config
            .display
            .checkmark
            .repeat(completed_work_sessions as usize);
        self.log.on_progress_update(completed_work_sessions);
        self.flush_json();
        self.redraw();
    }

    fn on_cue(&mut self, cue: Cue) {
        self.log.on_cue(cue);
        self.flush_json();
        if self.config.notifications.bell && !self.json {
            print!("{}", bell(cue));
        }
    }

    fn on_idle(&mut self) {
        self.label = IDLE_LABEL;
        self.log.on_idle();
        self.flush_json();
        self.redraw();
    }
}
