//! Configuration for deis-deploy
//!
//! Two sources feed a deployment:
//! - `deploy.yaml` ([`DeployConfig`]): static knobs with built-in defaults
//! - the process environment ([`settings::Settings`]): credentials, image
//!   references and app names supplied by CI

pub mod layout;
pub mod settings;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::Target;
use crate::error::{DeployError, Result, config};

pub use layout::TargetLayout;
pub use settings::{EnvVars, Settings};

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "deploy.yaml";

const REGION_PLACEHOLDER: &str = "{region}";

/// deploy.yaml contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeployConfig {
    /// Controller URL template; `{region}` is replaced per region
    pub controller_url: String,

    /// Rolling tag pushed alongside the image's own tag
    pub last_build_tag: String,

    /// Regions where admin apps are never deployed
    pub admin_excluded_regions: Vec<String>,

    /// Per-target region overrides
    pub regions: BTreeMap<Target, Vec<String>>,

    pub deis: DeisConfig,
    pub demo: DemoConfig,
    pub newrelic: NewRelicConfig,

    /// Images built by `deis-deploy build`
    pub images: Vec<ImageConfig>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            controller_url: "https://deis.{region}.moz.works".to_string(),
            last_build_tag: "last_successful_build".to_string(),
            admin_excluded_regions: vec!["eu-west".to_string()],
            regions: BTreeMap::new(),
            deis: DeisConfig::default(),
            demo: DemoConfig::default(),
            newrelic: NewRelicConfig::default(),
            images: vec![ImageConfig::default()],
        }
    }
}

/// Deis client installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeisConfig {
    /// Install the client before deploying. When false, `deis` must be on PATH.
    pub install: bool,
    pub install_script_url: String,
    pub install_dir: PathBuf,
}

impl Default for DeisConfig {
    fn default() -> Self {
        Self {
            install: true,
            install_script_url: "https://deis.io/deis-cli/install-v2.sh".to_string(),
            install_dir: PathBuf::from(".deis-cli"),
        }
    }
}

impl DeisConfig {
    /// Path of the client binary used by deploy steps
    pub fn binary(&self) -> PathBuf {
        if self.install {
            self.install_dir.join("deis")
        } else {
            PathBuf::from("deis")
        }
    }
}

/// Demo app settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Stripped from the front of the branch name
    pub branch_prefix: String,
    /// Prepended to the derived app name
    pub app_prefix: String,
    /// Account granted access to freshly created demo apps
    pub perms_user: String,
    /// Env file pushed with `deis config:push`
    pub config_file: PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            branch_prefix: "demo__".to_string(),
            app_prefix: "basket-demo-".to_string(),
            perms_user: "jenkins".to_string(),
            config_file: PathBuf::from("demo.env"),
        }
    }
}

/// New Relic deployment notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewRelicConfig {
    pub endpoint: String,
    /// Template for the New Relic app name; supports `{app}` and `{region}`
    pub app_name: String,
}

impl Default for NewRelicConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.newrelic.com/deployments.xml".to_string(),
            app_name: "{app}-{region}".to_string(),
        }
    }
}

impl NewRelicConfig {
    pub fn app_name_for(&self, app: &str, region: &str) -> String {
        self.app_name
            .replace("{app}", app)
            .replace(REGION_PLACEHOLDER, region)
    }
}

/// One container image recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    pub dockerfile: PathBuf,
    pub context: PathBuf,
    /// Appended to `DOCKER_IMAGE_TAG`, e.g. `-test`
    pub tag_suffix: Option<String>,
    pub build_args: BTreeMap<String, String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            dockerfile: PathBuf::from("Dockerfile"),
            context: PathBuf::from("."),
            tag_suffix: None,
            build_args: BTreeMap::new(),
        }
    }
}

impl DeployConfig {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `deploy.yaml` in the current
    /// directory is used when present, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if explicit {
                return Err(config::not_found(path.display().to_string()));
            }
            tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }

        let path_shown = path.display().to_string();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| config::read_failed(&path_shown, e.to_string()))?;
        let parsed = Self::from_yaml(&content).map_err(|e| match e {
            DeployError::ConfigParseFailed { reason, .. } => {
                config::parse_failed(&path_shown, reason)
            }
            other => other,
        })?;
        tracing::debug!("loaded configuration from {}", path_shown);
        Ok(parsed)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if !self.controller_url.contains(REGION_PLACEHOLDER) {
            return Err(config::invalid(format!(
                "controller_url must contain {REGION_PLACEHOLDER}: {}",
                self.controller_url
            )));
        }
        self.controller_for("us-west")?;

        Url::parse(&self.newrelic.endpoint).map_err(|e| {
            config::invalid(format!(
                "newrelic.endpoint is not a valid URL ({}): {e}",
                self.newrelic.endpoint
            ))
        })?;

        if self.deis.install {
            Url::parse(&self.deis.install_script_url).map_err(|e| {
                config::invalid(format!(
                    "deis.install_script_url is not a valid URL ({}): {e}",
                    self.deis.install_script_url
                ))
            })?;
        }

        if let Some((target, _)) = self.regions.iter().find(|(_, r)| r.is_empty()) {
            return Err(config::invalid(format!(
                "regions.{target} must list at least one region"
            )));
        }

        if self.last_build_tag.trim().is_empty() {
            return Err(config::invalid("last_build_tag must not be empty"));
        }

        if self.images.is_empty() {
            return Err(config::invalid("images must list at least one image"));
        }

        Ok(())
    }

    /// Controller URL for a region
    pub fn controller_for(&self, region: &str) -> Result<Url> {
        let rendered = self.controller_url.replace(REGION_PLACEHOLDER, region);
        Url::parse(&rendered).map_err(|e| {
            config::invalid(format!("controller_url renders to an invalid URL ({rendered}): {e}"))
        })
    }

    /// Regions for a target, honoring overrides
    pub fn regions_for(&self, target: Target) -> Vec<String> {
        self.regions
            .get(&target)
            .cloned()
            .unwrap_or_else(|| target.default_regions())
    }
}
