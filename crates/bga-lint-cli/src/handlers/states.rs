//! States command handler

use super::{emit, open_project};
use crate::commands::{ReportFormat, StatesArgs};
use crate::config::CliConfig;
use crate::error::CliResult;
use bga_lint::StateOverview;

/// Execute the states command
pub fn execute_states(config: &CliConfig, args: &StatesArgs) -> CliResult<()> {
    let (project, sources) = open_project(config, &args.target)?;
    let overview = StateOverview::from_sources(&sources)?;
    emit(&render_states(&overview, &project.name, args.format)?);
    Ok(())
}

/// Render the overview in the requested format
pub fn render_states(
    overview: &StateOverview,
    label: &str,
    format: ReportFormat,
) -> CliResult<String> {
    match format {
        ReportFormat::Text => Ok(overview.render(label)),
        ReportFormat::Json => Ok(overview.render_json()?),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::handlers::fixtures;
    use crate::project::load_sources;
    use tempfile::TempDir;

    #[test]
    fn test_text_lists_every_state() {
        let dir = TempDir::new().unwrap();
        fixtures::clean_project(dir.path());
        let overview = StateOverview::from_sources(&load_sources(dir.path()).unwrap()).unwrap();
        let text = render_states(&overview, "hearts", ReportFormat::Text).unwrap();
        assert!(text.contains("[1] gameSetup"));
        assert!(text.contains("[10] playerTurn"));
        assert!(text.contains("next -> 99"));
        assert!(text.ends_with("3 state(s)\n"));
    }

    #[test]
    fn test_json_is_an_object_with_states() {
        let dir = TempDir::new().unwrap();
        fixtures::clean_project(dir.path());
        let overview = StateOverview::from_sources(&load_sources(dir.path()).unwrap()).unwrap();
        let json = render_states(&overview, "hearts", ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["states"].as_array().unwrap().len(), 3);
    }
}
