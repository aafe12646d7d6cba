//! docker client invocations

use std::collections::BTreeMap;
use std::path::Path;

use super::ExternalCommand;
use crate::domain::Secret;

/// Builds `docker` invocations
#[derive(Debug, Clone)]
pub struct Docker {
    binary: String,
}

impl Default for Docker {
    fn default() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }
}

impl Docker {
    fn command(&self) -> ExternalCommand {
        ExternalCommand::new(&self.binary)
    }

    /// Log in to Docker Hub. The password goes through stdin.
    pub fn login(&self, username: &str, password: &Secret) -> ExternalCommand {
        self.command()
            .args(["login", "--username", username, "--password-stdin"])
            .stdin_secret(password.clone())
    }

    pub fn tag(&self, source: &str, target: &str) -> ExternalCommand {
        self.command().args(["tag", source, target])
    }

    pub fn push(&self, image: &str) -> ExternalCommand {
        self.command().args(["push", image])
    }

    /// Build an image, always pulling a fresh base image
    pub fn build(
        &self,
        dockerfile: &Path,
        context: &Path,
        tag: &str,
        build_args: &BTreeMap<String, String>,
    ) -> ExternalCommand {
        let mut cmd = self
            .command()
            .args(["build", "--pull", "--file"])
            .arg(dockerfile)
            .args(["--tag", tag]);
        for (key, value) in build_args {
            cmd = cmd.arg("--build-arg").arg(format!("{key}={value}"));
        }
        cmd.arg(context)
    }
}
