//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting while a deploy runs its steps
//! - Interactive progress bars using indicatif
//! - Silent progress for non-terminal output (CI logs), INFO logging and tests
//!
//! All progress reporting goes through the ProgressReporter trait, allowing
//! different implementations based on where output goes.

pub mod formatter;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::level_filters::LevelFilter;

/// Progress reporter trait for a sequence of deploy steps
pub trait ProgressReporter {
    /// A step is about to run
    fn start_step(&mut self, description: &str, current: usize, total: usize);

    /// The step finished (successfully or with a tolerated failure)
    fn finish_step(&mut self);

    /// Every step finished
    fn finish(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a visual progress bar
pub struct InteractiveProgressReporter {
    step_pb: ProgressBar,
}

impl InteractiveProgressReporter {
    pub fn new(total_steps: u64) -> Self {
        let step_style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let step_pb = ProgressBar::new(total_steps);
        step_pb.set_style(step_style);

        Self { step_pb }
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn start_step(&mut self, description: &str, current: usize, total: usize) {
        let msg = format!("({current}/{total}) {description}");
        self.step_pb.set_message(msg);
    }

    fn finish_step(&mut self) {
        self.step_pb.inc(1);
    }

    fn finish(&mut self) {
        self.step_pb
            .finish_with_message(format!("{}", style("deploy complete").green().bold()));
    }

    fn abandon(&mut self) {
        self.step_pb
            .abandon_with_message(format!("{}", style("deploy failed").red().bold()));
    }
}

/// Silent progress reporter
///
/// No-op implementation; step progress is still visible through log lines.
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn start_step(&mut self, _description: &str, _current: usize, _total: usize) {}

    fn finish_step(&mut self) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}

/// Pick a reporter for the current terminal and log level
pub fn reporter_for(total_steps: usize) -> Box<dyn ProgressReporter> {
    if wants_progress_bar(console::Term::stderr().is_term(), LevelFilter::current()) {
        Box::new(InteractiveProgressReporter::new(total_steps as u64))
    } else {
        Box::new(SilentProgressReporter)
    }
}

/// The bar shares stderr with the log output, so it is only drawn when
/// INFO records (step lines and child output) are filtered out.
fn wants_progress_bar(stderr_is_term: bool, max_level: LevelFilter) -> bool {
    stderr_is_term && max_level < LevelFilter::INFO
}
