//! Deis Workflow client invocations

use std::path::{Path, PathBuf};

use url::Url;

use super::ExternalCommand;
use crate::domain::Secret;

/// Builds `deis` invocations against a client binary
#[derive(Debug, Clone)]
pub struct Deis {
    binary: PathBuf,
}

impl Deis {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self) -> ExternalCommand {
        ExternalCommand::new(&self.binary)
    }

    /// Log in to a region's controller
    pub fn login(&self, controller: &Url, username: &str, password: &Secret) -> ExternalCommand {
        self.command()
            .args(["login", controller.as_str(), "--username", username, "--password"])
            .secret_arg(password)
    }

    pub fn create_app(&self, app: &str) -> ExternalCommand {
        self.command().args(["apps:create", app, "--no-remote"])
    }

    /// Grant `user` access to `app`. Allowed to fail: the grant usually exists.
    pub fn grant_perms(&self, user: &str, app: &str) -> ExternalCommand {
        self.command()
            .args(["perms:create", user, "-a", app])
            .best_effort()
    }

    pub fn push_config(&self, app: &str, env_file: &Path) -> ExternalCommand {
        self.command()
            .args(["config:push", "-a", app, "-p"])
            .arg(env_file)
    }

    /// Deploy `image` to `app`
    pub fn pull(&self, image: &str, app: &str) -> ExternalCommand {
        self.command().args(["pull", image, "-a", app])
    }
}
