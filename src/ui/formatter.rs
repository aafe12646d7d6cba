//! Text rendering of plans and run summaries

use std::fmt::Write;

use console::Style;

use crate::pipeline::{ExecutionReport, Plan};

/// Render a plan as a numbered list of steps with their commands
pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} ({} steps)",
        Style::new().bold().apply_to("Deploy plan for"),
        Style::new().bold().yellow().apply_to(plan.target),
        plan.image,
        plan.len()
    );

    for (index, step) in plan.steps.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {}",
            index + 1,
            Style::new().bold().apply_to(step.description())
        );
        let _ = writeln!(out, "      {}", Style::new().cyan().apply_to(step));
    }

    out
}

/// Render the summary printed after a successful deploy
pub fn render_report(plan: &Plan, report: &ExecutionReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} to {} ({} steps)",
        Style::new().bold().green().apply_to("Deployed"),
        plan.image,
        plan.target,
        report.executed
    );
    for failure in &report.skipped_failures {
        let _ = writeln!(
            out,
            "  {} {} failed and was skipped",
            Style::new().yellow().apply_to("warning:"),
            failure
        );
    }
    out
}
