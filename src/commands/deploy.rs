//! Deploy command implementation

use std::path::PathBuf;

use crate::cli::DeployArgs;
use crate::cmd::SystemRunner;
use crate::config::EnvVars;
use crate::error::Result;
use crate::notify::ReqwestTransport;
use crate::pipeline::Executor;
use crate::ui::{formatter, reporter_for};

use super::helpers;

/// Run deploy command
pub fn run(config_path: Option<PathBuf>, args: DeployArgs) -> Result<()> {
    let vars = EnvVars::from_process();
    let (config, plan) = helpers::build_plan(config_path.as_deref(), &vars, args.target)?;

    if args.dry_run {
        print!("{}", formatter::render_plan(&plan));
        return Ok(());
    }

    if config.deis.install {
        helpers::require_tools(&["docker", "bash"])?;
    } else {
        helpers::require_tools(&["docker", "deis"])?;
    }

    tracing::info!(
        "deploying {} to {} ({} steps)",
        plan.image,
        plan.target,
        plan.len()
    );

    let mut runner = SystemRunner;
    let mut transport = ReqwestTransport::new()?;
    let mut progress = reporter_for(plan.len());
    let report = Executor::new(&mut runner, &mut transport, progress.as_mut()).execute(&plan)?;

    print!("{}", formatter::render_report(&plan, &report));
    Ok(())
}
