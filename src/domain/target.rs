//! Deploy targets and their application table
//!
//! A target (`demo`, `stage`, `prod`) maps to a fixed list of application
//! roles and a default list of regions. Application names themselves come from
//! the environment, except for `demo` where the name is derived from the
//! branch being built.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Deployment environment selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Demo,
    Stage,
    Prod,
}

impl Target {
    /// Application roles deployed for this target, in deploy order
    pub fn app_roles(self) -> &'static [AppRole] {
        match self {
            Target::Demo => &[AppRole::Demo],
            Target::Stage => &[AppRole::Dev, AppRole::Stage, AppRole::AdminStage],
            Target::Prod => &[AppRole::Prod, AppRole::Admin],
        }
    }

    /// Regions used when the configuration file does not override them
    pub fn default_regions(self) -> Vec<String> {
        let regions: &[&str] = match self {
            Target::Demo => &["us-west"],
            Target::Stage | Target::Prod => &["us-west", "eu-west"],
        };
        regions.iter().map(|r| (*r).to_string()).collect()
    }

    pub fn is_demo(self) -> bool {
        self == Target::Demo
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Demo => write!(f, "demo"),
            Target::Stage => write!(f, "stage"),
            Target::Prod => write!(f, "prod"),
        }
    }
}

/// Logical application slot within a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppRole {
    Demo,
    Dev,
    Stage,
    AdminStage,
    Prod,
    Admin,
}

impl AppRole {
    /// Environment variable holding the app name. `Demo` names are derived.
    pub fn env_var(self) -> Option<&'static str> {
        match self {
            AppRole::Demo => None,
            AppRole::Dev => Some("DEIS_DEV_APP"),
            AppRole::Stage => Some("DEIS_STAGE_APP"),
            AppRole::AdminStage => Some("DEIS_ADMIN_STAGE_APP"),
            AppRole::Prod => Some("DEIS_PROD_APP"),
            AppRole::Admin => Some("DEIS_ADMIN_APP"),
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, AppRole::AdminStage | AppRole::Admin)
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppRole::Demo => "demo",
            AppRole::Dev => "dev",
            AppRole::Stage => "stage",
            AppRole::AdminStage => "admin-stage",
            AppRole::Prod => "prod",
            AppRole::Admin => "admin",
        };
        f.write_str(name)
    }
}

/// A resolved application: its role and its Deis app name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSlot {
    pub role: AppRole,
    pub name: String,
}

impl AppSlot {
    pub fn new(role: AppRole, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
        }
    }
}

/// One application in one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deployment {
    pub region: String,
    pub app: AppSlot,
}

/// Derive the demo app name from a CI branch name.
///
/// `demo__my_feature` with prefix `basket-demo-` becomes
/// `basket-demo-my-feature`. Returns `None` if nothing is left of the branch
/// once the branch prefix is removed.
pub fn demo_app_name(app_prefix: &str, branch_prefix: &str, branch: &str) -> Option<String> {
    let suffix = branch.strip_prefix(branch_prefix).unwrap_or(branch);
    if suffix.is_empty() {
        return None;
    }
    Some(format!("{}{}", app_prefix, suffix.replace('_', "-")))
}
