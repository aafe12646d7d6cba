//! Common test utilities for deis-deploy integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Environment shared by every deploy test
pub const BASE_ENV: &[(&str, &str)] = &[
    ("DOCKER_USERNAME", "ci-bot"),
    ("DOCKER_PASSWORD", "docker-secret"),
    ("DOCKER_REPOSITORY", "mozmeao/basket"),
    ("DOCKER_IMAGE_TAG", "mozmeao/basket:abc123"),
    ("DEIS_USERNAME", "deployer"),
    ("DEIS_PASSWORD", "deis-secret"),
];

pub const STAGE_APPS: &[(&str, &str)] = &[
    ("DEIS_DEV_APP", "basket-dev"),
    ("DEIS_STAGE_APP", "basket-stage"),
    ("DEIS_ADMIN_STAGE_APP", "basket-admin-stage"),
];

pub const PROD_APPS: &[(&str, &str)] = &[
    ("DEIS_PROD_APP", "basket-prod"),
    ("DEIS_ADMIN_APP", "basket-admin"),
];

/// A scratch directory used as the working directory of the binary
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Install a fake tool in `bin/` that appends its arguments to `calls.log`.
    ///
    /// The tool exits with 1 when its arguments contain `fail_on`.
    #[cfg(unix)]
    pub fn fake_tool(&self, name: &str, fail_on: Option<&str>) {
        use std::os::unix::fs::PermissionsExt;

        let log = self.path.join("calls.log");
        let fail = fail_on
            .map(|f| format!("case \"$*\" in *{f}*) exit 1 ;; esac\n"))
            .unwrap_or_default();
        let script = format!(
            "#!/bin/sh\n[ $# -eq 0 ] && exit 0\necho \"{name} $*\" >> \"{}\"\n{fail}exit 0\n",
            log.display()
        );
        let path = self.path.join("bin").join(name);
        self.write_file(&format!("bin/{name}"), &script);
        let mut perms = std::fs::metadata(&path).expect("tool metadata").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod tool");
    }

    /// Commands recorded by fake tools, one per line
    pub fn calls(&self) -> Vec<String> {
        let log = self.path.join("calls.log");
        if !log.exists() {
            return Vec::new();
        }
        self.read_file("calls.log")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// PATH with the fake tools first
    pub fn path_env(&self) -> String {
        format!("{}:/usr/bin:/bin", self.path.join("bin").display())
    }

    /// The binary with a clean environment, running inside the workspace
    pub fn cmd(&self, extra_env: &[&[(&str, &str)]]) -> Command {
        let mut cmd = deis_deploy_cmd();
        cmd.current_dir(&self.path)
            .env_clear()
            .env("PATH", self.path_env());
        for (key, value) in BASE_ENV {
            cmd.env(key, value);
        }
        for group in extra_env {
            for (key, value) in *group {
                cmd.env(key, value);
            }
        }
        cmd
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn deis_deploy_cmd() -> Command {
    Command::cargo_bin("deis-deploy").expect("binary is built")
}
