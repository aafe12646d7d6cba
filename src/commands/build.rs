//! Build command implementation
//!
//! Builds every image listed in the configuration, tagged from
//! `DOCKER_IMAGE_TAG`, and optionally pushes it.

use std::path::PathBuf;

use crate::cli::BuildArgs;
use crate::cmd::{CommandRunner, Docker, ExternalCommand, SystemRunner};
use crate::config::settings::image_from_env;
use crate::config::{DeployConfig, EnvVars};
use crate::error::Result;

use super::helpers;

/// Run build command
pub fn run(config_path: Option<PathBuf>, args: BuildArgs) -> Result<()> {
    let vars = EnvVars::from_process();
    let config = DeployConfig::load(config_path.as_deref())?;
    let image = image_from_env(&vars)?;
    let commands = build_commands(&config, &image, args.push);

    if args.dry_run {
        for cmd in &commands {
            println!("{cmd}");
        }
        return Ok(());
    }

    helpers::require_tools(&["docker"])?;
    let mut runner = SystemRunner;
    for cmd in &commands {
        runner.run(cmd)?;
    }

    println!("Built {} image(s) from {}", config.images.len(), image);
    Ok(())
}

/// docker commands for every configured image, in order
pub fn build_commands(config: &DeployConfig, image: &str, push: bool) -> Vec<ExternalCommand> {
    let docker = Docker::default();
    let mut commands = Vec::new();
    for recipe in &config.images {
        let tag = format!("{}{}", image, recipe.tag_suffix.as_deref().unwrap_or_default());
        commands.push(docker.build(&recipe.dockerfile, &recipe.context, &tag, &recipe.build_args));
        if push {
            commands.push(docker.push(&tag));
        }
    }
    commands
}
