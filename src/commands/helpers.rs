//! Command helper utilities

use std::path::Path;

use crate::cmd::does_binary_exist;
use crate::config::{DeployConfig, EnvVars, Settings, TargetLayout};
use crate::domain::Target;
use crate::error::{Result, command};
use crate::pipeline::Plan;

/// Load configuration and settings and build the plan for `target`
pub fn build_plan(
    config_path: Option<&Path>,
    vars: &EnvVars,
    target: Target,
) -> Result<(DeployConfig, Plan)> {
    let config = DeployConfig::load(config_path)?;
    let layout = TargetLayout::resolve(target, vars, &config)?;
    let settings = Settings::from_env(vars)?;
    let plan = Plan::build(&layout, &settings, &config)?;
    tracing::debug!("built {} step plan for {}", plan.len(), target);
    Ok((config, plan))
}

/// Fail early when a tool the run depends on is missing
pub fn require_tools(tools: &[&str]) -> Result<()> {
    for tool in tools {
        if !does_binary_exist(tool) {
            return Err(command::tool_not_found(*tool));
        }
    }
    Ok(())
}
