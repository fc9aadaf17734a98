//! Validate command handler

use super::{emit, open_project, reporter};
use crate::commands::{ReportFormat, ValidateArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use bga_lint::{render_report, render_report_json, LintOutcome, ProjectSources, StateModelLinter};

/// Execute the validate command
pub fn execute_validate(config: &CliConfig, args: &ValidateArgs) -> CliResult<()> {
    let status = reporter(config);
    let (project, sources) = open_project(config, &args.target)?;
    status.info(&format!("Validating {}", project.root.display()));

    let outcome = lint_project(config, &sources)?;
    emit(&render_outcome(&outcome, &project.name, args.format)?);
    status.verdict(&outcome, args.strict);
    check_outcome(&outcome, args.strict)
}

/// Run the linter with the configured rules
pub fn lint_project(config: &CliConfig, sources: &ProjectSources) -> CliResult<LintOutcome> {
    let linter = StateModelLinter::new(config.load_linter_config()?);
    Ok(linter.lint(sources)?)
}

/// Render the outcome in the requested format
pub fn render_outcome(
    outcome: &LintOutcome,
    label: &str,
    format: ReportFormat,
) -> CliResult<String> {
    match format {
        ReportFormat::Text => Ok(render_report(outcome, label)),
        ReportFormat::Json => Ok(render_report_json(outcome, label)?),
    }
}

/// Map the outcome to the exit status: errors always fail, warnings only
/// under `--strict`
pub fn check_outcome(outcome: &LintOutcome, strict: bool) -> CliResult<()> {
    let errors = outcome.error_count();
    let warnings = outcome.warning_count();
    if errors > 0 || (strict && warnings > 0) {
        return Err(CliError::validation_failed(errors, warnings));
    }
    Ok(())
}
