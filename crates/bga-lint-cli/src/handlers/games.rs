//! Games command handler

use super::{emit, reporter};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::project::{discover_games, GameTags};
use std::path::Path;

/// Execute the games command
pub fn execute_games(config: &CliConfig) -> CliResult<()> {
    let Some(workspace) = &config.workspace else {
        return Err(CliError::config(
            "No workspace configured. Pass --workspace <dir> or set BGA_WORKSPACE_PATH.",
        ));
    };
    if !workspace.is_dir() {
        return Err(CliError::config(format!(
            "Workspace `{}` is not a directory",
            workspace.display()
        )));
    }
    let listing = render_games(workspace)?;
    match listing {
        Some(text) => emit(&text),
        None => reporter(config).warning(&format!(
            "No BGA game projects found in {}",
            workspace.display()
        )),
    }
    Ok(())
}

/// One line per game with its marker files, or `None` when there are none
pub fn render_games(workspace: &Path) -> CliResult<Option<String>> {
    let games = discover_games(workspace)?;
    if games.is_empty() {
        return Ok(None);
    }
    let width = games.iter().map(String::len).max().unwrap_or(0);
    let mut output = String::new();
    for game in &games {
        let tags = GameTags::scan(&workspace.join(game)).labels().join(", ");
        output.push_str(&format!("{game:<width$}  [{tags}]\n"));
    }
    output.push_str(&format!("\n{} game(s) in {}\n", games.len(), workspace.display()));
    Ok(Some(output))
}
