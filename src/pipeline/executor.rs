//! Sequential execution of a plan
//!
//! Steps run one at a time in plan order. The first failure a step does not
//! tolerate stops the run; nothing is retried or rolled back.

use std::path::Path;

use super::{Plan, Step};
use crate::cmd::{CommandRunner, ExternalCommand};
use crate::error::Result;
use crate::notify::HttpTransport;
use crate::ui::ProgressReporter;

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Steps that ran, including tolerated failures
    pub executed: usize,
    /// Descriptions of steps whose failure was tolerated
    pub skipped_failures: Vec<String>,
}

/// Runs plan steps against real (or fake) integrations
pub struct Executor<'a> {
    runner: &'a mut dyn CommandRunner,
    transport: &'a mut dyn HttpTransport,
    progress: &'a mut dyn ProgressReporter,
}

impl<'a> Executor<'a> {
    pub fn new(
        runner: &'a mut dyn CommandRunner,
        transport: &'a mut dyn HttpTransport,
        progress: &'a mut dyn ProgressReporter,
    ) -> Self {
        Self {
            runner,
            transport,
            progress,
        }
    }

    pub fn execute(&mut self, plan: &Plan) -> Result<ExecutionReport> {
        let total = plan.len();
        let mut report = ExecutionReport::default();

        for (index, step) in plan.steps.iter().enumerate() {
            let description = step.description();
            self.progress.start_step(&description, index + 1, total);
            tracing::info!("[{}/{}] {}", index + 1, total, description);

            match self.run_step(step) {
                Ok(()) => {}
                Err(err) if step.tolerates(&err) => {
                    tracing::warn!("{} failed, continuing: {}", description, err);
                    report.skipped_failures.push(description);
                }
                Err(err) => {
                    self.progress.abandon();
                    tracing::error!("{} failed: {}", description, err);
                    return Err(err);
                }
            }

            report.executed += 1;
            self.progress.finish_step();
        }

        self.progress.finish();
        Ok(report)
    }

    fn run_step(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Command { command, .. } => self.runner.run(command),
            Step::InstallCli { script_url, dir } => self.install_cli(script_url, dir),
            Step::Notify(notification) => notification.send(self.transport),
        }
    }

    /// Equivalent of `curl -sSL <url> | bash` run inside `dir`
    fn install_cli(&mut self, script_url: &str, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let script = self.transport.get_text(script_url)?;
        let cmd = ExternalCommand::new("bash")
            .arg("-s")
            .stdin_text(script)
            .current_dir(dir);
        self.runner.run(&cmd)
    }
}
