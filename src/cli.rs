//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::Target;

/// deis-deploy - push images and roll them out to Deis apps
#[derive(Parser, Debug)]
#[command(
    name = "deis-deploy",
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Push container images and deploy them to Deis apps across regions",
    long_about = "deis-deploy pushes the CI-built image to Docker Hub, installs the Deis client \
                  and pulls the image into every app of the chosen environment, region by region. \
                  Credentials, image references and app names are read from the environment.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  deis-deploy deploy stage\n    \
                  deis-deploy deploy demo --dry-run\n    \
                  deis-deploy plan prod --format json\n    \
                  deis-deploy build --push"
)]
pub struct Cli {
    /// Configuration file (defaults to ./deploy.yaml when present)
    #[arg(long, short = 'c', global = true, env = "DEIS_DEPLOY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Push the image and deploy it to every app of an environment
    Deploy(DeployArgs),

    /// Print the steps a deploy would run
    Plan(PlanArgs),

    /// Build the container images
    Build(BuildArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the deploy command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Deploy to stage (dev, stage and admin-stage apps):\n    deis-deploy deploy stage\n\n\
                   Deploy the current branch as a demo app:\n    deis-deploy deploy demo\n\n\
                   Show what would run without running it:\n    deis-deploy deploy prod --dry-run")]
pub struct DeployArgs {
    /// Target environment
    #[arg(value_enum)]
    pub target: Target,

    /// Print the plan instead of executing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Output format for the plan command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the plan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show the stage plan:\n    deis-deploy plan stage\n\n\
                  Machine-readable plan:\n    deis-deploy plan prod --format json")]
pub struct PlanArgs {
    /// Target environment
    #[arg(value_enum)]
    pub target: Target,

    /// Output format
    #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
    pub format: PlanFormat,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Build images listed in deploy.yaml:\n    deis-deploy build\n\n\
                  Build and push:\n    deis-deploy build --push")]
pub struct BuildArgs {
    /// Push each image after it is built
    #[arg(long)]
    pub push: bool,

    /// Print the docker commands without running them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    deis-deploy completions --shell bash > ~/.bash_completion.d/deis-deploy\n\n\
                  Generate zsh completions:\n    deis-deploy completions --shell zsh > ~/.zfunc/_deis-deploy")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_deploy() {
        let cli = Cli::try_parse_from(["deis-deploy", "deploy", "stage"]).unwrap();
        match cli.command {
            Commands::Deploy(args) => {
                assert_eq!(args.target, Target::Stage);
                assert!(!args.dry_run);
            }
            _ => panic!("Expected Deploy command"),
        }
    }

    #[test]
    fn test_cli_parsing_deploy_dry_run() {
        let cli = Cli::try_parse_from(["deis-deploy", "deploy", "demo", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Deploy(args) => {
                assert_eq!(args.target, Target::Demo);
                assert!(args.dry_run);
            }
            _ => panic!("Expected Deploy command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_target() {
        assert!(Cli::try_parse_from(["deis-deploy", "deploy", "qa"]).is_err());
    }

    #[test]
    fn test_cli_requires_target() {
        assert!(Cli::try_parse_from(["deis-deploy", "deploy"]).is_err());
    }

    #[test]
    fn test_cli_parsing_plan_json() {
        let cli =
            Cli::try_parse_from(["deis-deploy", "plan", "prod", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.target, Target::Prod);
                assert_eq!(args.format, PlanFormat::Json);
            }
            _ => panic!("Expected Plan command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "deis-deploy",
            "build",
            "--push",
            "-v",
            "--config",
            "ci/deploy.yaml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("ci/deploy.yaml")));
        match cli.command {
            Commands::Build(args) => assert!(args.push),
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_parsing_version() {
        let cli = Cli::try_parse_from(["deis-deploy", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }
}
