//! Migration-status command handler

use super::{emit, open_project};
use crate::commands::{MigrationArgs, ReportFormat};
use crate::config::CliConfig;
use crate::error::CliResult;
use bga_lint::migration::{render_migration, render_migration_json};
use bga_lint::MigrationReport;

/// Execute the migration-status command
pub fn execute_migration_status(config: &CliConfig, args: &MigrationArgs) -> CliResult<()> {
    let (project, sources) = open_project(config, &args.target)?;
    let report = bga_lint::scan_migration(&sources, &config.load_linter_config()?);
    emit(&render_migration_status(&report, &project.name, args.format)?);
    Ok(())
}

/// Render a migration report in the requested format
pub fn render_migration_status(
    report: &MigrationReport,
    label: &str,
    format: ReportFormat,
) -> CliResult<String> {
    match format {
        ReportFormat::Text => Ok(render_migration(report, label)),
        ReportFormat::Json => Ok(render_migration_json(report)?),
    }
}
