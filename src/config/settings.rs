//! Environment-provided deployment settings
//!
//! CI exports credentials, the image reference and app names as environment
//! variables. They are read once into an [`EnvVars`] snapshot so the rest of
//! the crate never touches the process environment.

use std::collections::HashMap;

use crate::domain::Secret;
use crate::error::{Result, env};

/// Snapshot of environment variables. Empty values count as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| env::missing(name))
    }

    fn secret(&self, name: &str) -> Result<Secret> {
        self.require(name).map(Secret::new)
    }
}

/// Container registry credentials and image references
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub username: String,
    pub password: Secret,
    /// Repository without tag, e.g. `mozmeao/basket`
    pub repository: String,
    /// Full image reference that is pushed and then pulled by Deis
    pub image: String,
}

impl RegistrySettings {
    pub fn from_env(vars: &EnvVars) -> Result<Self> {
        Ok(Self {
            username: vars.require("DOCKER_USERNAME")?.to_string(),
            password: vars.secret("DOCKER_PASSWORD")?,
            repository: vars.require("DOCKER_REPOSITORY")?.to_string(),
            image: image_from_env(vars)?,
        })
    }

    /// `<repository>:<tag>` for the rolling tag
    pub fn rolling_image(&self, tag: &str) -> String {
        format!("{}:{}", self.repository, tag)
    }
}

/// Reads `DOCKER_IMAGE_TAG`, the only registry variable `build` needs
pub fn image_from_env(vars: &EnvVars) -> Result<String> {
    let image = vars.require("DOCKER_IMAGE_TAG")?;
    if image.chars().any(char::is_whitespace) {
        return Err(env::invalid(
            "DOCKER_IMAGE_TAG",
            "image reference must not contain whitespace",
        ));
    }
    Ok(image.to_string())
}

/// Deis controller credentials
#[derive(Debug, Clone)]
pub struct PaasSettings {
    pub username: String,
    pub password: Secret,
}

impl PaasSettings {
    pub fn from_env(vars: &EnvVars) -> Result<Self> {
        Ok(Self {
            username: vars.require("DEIS_USERNAME")?.to_string(),
            password: vars.secret("DEIS_PASSWORD")?,
        })
    }
}

/// New Relic deployment notification settings
#[derive(Debug, Clone)]
pub struct NewRelicSettings {
    pub api_key: Secret,
    pub user: String,
    pub revision: String,
}

impl NewRelicSettings {
    /// `None` when `NEWRELIC_API_KEY` is unset. With a key, the CI user and
    /// revision become mandatory.
    pub fn from_env(vars: &EnvVars) -> Result<Option<Self>> {
        let Some(key) = vars.get("NEWRELIC_API_KEY") else {
            return Ok(None);
        };
        Ok(Some(Self {
            api_key: Secret::new(key),
            user: vars.require("CIRCLE_USERNAME")?.to_string(),
            revision: vars.require("CIRCLE_SHA1")?.to_string(),
        }))
    }
}

/// Everything `deploy` reads from the environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub registry: RegistrySettings,
    pub paas: PaasSettings,
    pub newrelic: Option<NewRelicSettings>,
}

impl Settings {
    pub fn from_env(vars: &EnvVars) -> Result<Self> {
        Ok(Self {
            registry: RegistrySettings::from_env(vars)?,
            paas: PaasSettings::from_env(vars)?,
            newrelic: NewRelicSettings::from_env(vars)?,
        })
    }
}
