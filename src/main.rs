//! deis-deploy - container image deployment to Deis Workflow
//!
//! Pushes a CI-built image to Docker Hub and rolls it out to every Deis app
//! of an environment (`demo`, `stage`, `prod`), region by region, optionally
//! recording each deployment in New Relic.

use clap::Parser;
use miette::Diagnostic;

mod cli;
mod cmd;
mod commands;
mod config;
mod domain;
mod error;
mod logging;
mod notify;
mod pipeline;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Deploy(args) => commands::deploy::run(cli.config, args),
        Commands::Plan(args) => commands::plan::run(cli.config, args),
        Commands::Build(args) => commands::build::run(cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
