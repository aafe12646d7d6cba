//! Resolved region/app table for one target

use serde::Serialize;

use super::{DeployConfig, EnvVars};
use crate::domain::{AppRole, AppSlot, Deployment, Target, demo_app_name};
use crate::error::{Result, env};

/// Regions and app names for a target, with app names looked up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetLayout {
    pub target: Target,
    pub regions: Vec<String>,
    pub apps: Vec<AppSlot>,
    /// Regions where admin apps are skipped
    #[serde(skip)]
    admin_excluded_regions: Vec<String>,
}

impl TargetLayout {
    /// Resolve the app names of `target` from the environment
    pub fn resolve(target: Target, vars: &EnvVars, config: &DeployConfig) -> Result<Self> {
        let apps = target
            .app_roles()
            .iter()
            .map(|role| resolve_app(*role, vars, config))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            target,
            regions: config.regions_for(target),
            apps,
            admin_excluded_regions: config.admin_excluded_regions.clone(),
        })
    }

    /// Apps deployed in `region`, in table order
    pub fn apps_in(&self, region: &str) -> impl Iterator<Item = &AppSlot> {
        let skip_admin = self.admin_excluded_regions.iter().any(|r| r == region);
        self.apps
            .iter()
            .filter(move |app| !(skip_admin && app.role.is_admin()))
    }

    /// Region-major list of every (region, app) pair that gets deployed
    pub fn deployments(&self) -> Vec<Deployment> {
        self.regions
            .iter()
            .flat_map(|region| {
                self.apps_in(region).map(move |app| Deployment {
                    region: region.clone(),
                    app: app.clone(),
                })
            })
            .collect()
    }
}

fn resolve_app(role: AppRole, vars: &EnvVars, config: &DeployConfig) -> Result<AppSlot> {
    match role.env_var() {
        Some(var) => Ok(AppSlot::new(role, vars.require(var)?)),
        None => {
            let branch = vars.require("CIRCLE_BRANCH")?;
            let name =
                demo_app_name(&config.demo.app_prefix, &config.demo.branch_prefix, branch)
                    .ok_or_else(|| {
                        env::invalid(
                            "CIRCLE_BRANCH",
                            format!(
                                "branch '{branch}' leaves no app name after removing '{}'",
                                config.demo.branch_prefix
                            ),
                        )
                    })?;
            Ok(AppSlot::new(role, name))
        }
    }
}
