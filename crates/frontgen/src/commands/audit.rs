//! CSS variable audit command.

use std::process::ExitCode;

use anyhow::{Context, Result};
use frontgen_css::{AllowList, AuditReport, VariableScanner};

use crate::project::Project;

/// Run the audit. Prints the report to stdout and fails if any variable is unreviewed.
pub fn run(project: &Project) -> Result<ExitCode> {
    let (report, allowlist) = audit(project)?;

    print!("{}", report);

    if report.is_clean() {
        return Ok(ExitCode::SUCCESS);
    }

    println!("Review the new CSS variables listed above.");
    println!("If they are intended, add them to {}", allowlist);

    Ok(ExitCode::FAILURE)
}

/// Scan templates and compare against the allow-list. Returns the report and the
/// configured allow-list path for guidance output.
fn audit(project: &Project) -> Result<(AuditReport, String)> {
    let css = &project.config.css;

    let index = VariableScanner::new(css.extensions.iter().cloned())
        .scan(&project.path(&css.src))
        .context("Failed to scan templates")?
        .relative_to(&project.root);

    let allowed = AllowList::load(&project.path(&css.allowlist))?;

    tracing::debug!(
        "{} variables found, {} reviewed",
        index.len(),
        allowed.len()
    );

    Ok((AuditReport::new(&index, &allowed), css.allowlist.clone()))
}
