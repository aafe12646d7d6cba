//! Plan command implementation

use std::path::PathBuf;

use crate::cli::{PlanArgs, PlanFormat};
use crate::config::EnvVars;
use crate::error::Result;
use crate::ui::formatter;

use super::helpers;

/// Run plan command
pub fn run(config_path: Option<PathBuf>, args: PlanArgs) -> Result<()> {
    let vars = EnvVars::from_process();
    let (_, plan) = helpers::build_plan(config_path.as_deref(), &vars, args.target)?;

    match args.format {
        PlanFormat::Text => print!("{}", formatter::render_plan(&plan)),
        PlanFormat::Json => println!("{}", plan.to_json()?),
    }

    Ok(())
}
