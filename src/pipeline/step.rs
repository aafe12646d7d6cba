//! A single deploy step

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::cmd::ExternalCommand;
use crate::error::DeployError;
use crate::notify::NewRelicNotification;

/// What one step of a deploy does
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Run an external command
    Command {
        description: String,
        command: ExternalCommand,
    },
    /// Download the Deis install script and run it in `dir`
    InstallCli { script_url: String, dir: PathBuf },
    /// Record a deployment in New Relic
    Notify(NewRelicNotification),
}

impl Step {
    pub fn command(description: impl Into<String>, command: ExternalCommand) -> Self {
        Step::Command {
            description: description.into(),
            command,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Step::Command { description, .. } => description.clone(),
            Step::InstallCli { dir, .. } => format!("install deis client into {}", dir.display()),
            Step::Notify(n) => format!("notify New Relic for {}", n.app_name),
        }
    }

    pub fn is_best_effort(&self) -> bool {
        matches!(self, Step::Command { command, .. } if command.best_effort)
    }

    /// Whether `err` from this step is logged and skipped instead of stopping
    /// the run. New Relic answering with an error status is tolerated; failing
    /// to reach it is not.
    pub fn tolerates(&self, err: &DeployError) -> bool {
        match self {
            Step::Command { command, .. } => command.best_effort,
            Step::Notify(_) => matches!(err, DeployError::HttpStatus { .. }),
            Step::InstallCli { .. } => false,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Command { command, .. } => {
                write!(f, "{command}")?;
                if self.is_best_effort() {
                    write!(f, "  (failure ignored)")?;
                }
                Ok(())
            }
            Step::InstallCli { script_url, dir } => {
                write!(f, "curl -sSL {script_url} | bash  (in {})", dir.display())
            }
            Step::Notify(n) => write!(
                f,
                "POST {} deployment[app_name]={} deployment[revision]={} deployment[user]={}",
                n.endpoint, n.app_name, n.revision, n.user
            ),
        }
    }
}
