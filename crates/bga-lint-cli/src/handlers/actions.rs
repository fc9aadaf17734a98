//! Actions command handler
//!
//! Lists player actions from both ends of the server: the methods in the main
//! logic file, and the actions each state declares.

use super::{emit, open_project};
use crate::commands::ProjectArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use bga_lint::parse::parse_sources;
use bga_lint::{list_player_actions, ProjectSources};

/// Execute the actions command
pub fn execute_actions(config: &CliConfig, args: &ProjectArgs) -> CliResult<()> {
    let (project, sources) = open_project(config, args)?;
    emit(&render_actions(&sources, &project.name)?);
    Ok(())
}

/// Render the action listing.
///
/// Fails when the project has neither a main logic file nor any state.
pub fn render_actions(sources: &ProjectSources, label: &str) -> CliResult<String> {
    let (mut states, _) = parse_sources(sources);
    states.sort_by_key(|s| s.id);
    if sources.main_logic.is_none() && states.is_empty() {
        return Err(CliError::project_not_found(format!(
            "No main logic file (Game.php or *.game.php) and no state definitions found in `{label}`"
        )));
    }

    let mut output = String::new();
    output.push_str(&format!("PLAYER ACTIONS: {label}\n"));
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    if let Some(main) = &sources.main_logic {
        let actions = list_player_actions(&main.text);
        output.push_str(&format!("{} ({}):\n", main.path, actions.len()));
        if actions.is_empty() {
            output.push_str("  (none)\n");
        }
        for action in &actions {
            let guard = if action.guarded { "  [checkAction]" } else { "" };
            output.push_str(&format!("  {}({}){guard}\n", action.name, action.params));
        }
        output.push('\n');
    }

    let declaring: Vec<_> = states.iter().filter(|s| !s.declared_actions.is_empty()).collect();
    output.push_str(&format!("Declared by states ({}):\n", declaring.len()));
    if declaring.is_empty() {
        output.push_str("  (none)\n");
    }
    for state in declaring {
        output.push_str(&format!(
            "  [{}] {}: {}\n",
            state.id,
            state.name,
            state.declared_actions.join(", ")
        ));
    }
    Ok(output)
}
