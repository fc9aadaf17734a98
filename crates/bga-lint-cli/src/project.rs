//! Project discovery and source loading
//!
//! Decides which file on disk plays which role and reads them into a
//! [`ProjectSources`] for the linter.

use crate::commands::ProjectArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use bga_lint::{ProjectSources, SourceFile, UnreadableFile};
use std::fs;
use std::path::{Path, PathBuf};

/// Legacy state file name
pub const LEGACY_STATES_FILE: &str = "states.inc.php";
/// State class directory, relative to the project root
pub const STATE_CLASS_DIR: &str = "modules/php/States";
/// Modern main logic location, relative to the project root
pub const MODERN_MAIN_LOGIC: &str = "modules/php/Game.php";

/// A selected game project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameProject {
    /// Display name (folder name)
    pub name: String,
    /// Project root directory
    pub root: PathBuf,
}

/// Marker files found in a game folder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameTags {
    /// Has a `*.game.php`
    pub game_php: bool,
    /// Has `states.inc.php`
    pub legacy_states: bool,
    /// Has `modules/php/States/`
    pub state_classes: bool,
}

impl GameTags {
    /// Inspect a directory
    #[must_use]
    pub fn scan(dir: &Path) -> Self {
        let files = root_files(dir).unwrap_or_default();
        Self {
            game_php: files.iter().any(|f| f.ends_with(".game.php")),
            legacy_states: files.iter().any(|f| f == LEGACY_STATES_FILE),
            state_classes: dir.join(STATE_CLASS_DIR).is_dir(),
        }
    }

    /// Whether the directory looks like a game project
    #[must_use]
    pub const fn is_game(self) -> bool {
        self.game_php || self.legacy_states || self.state_classes
    }

    /// Tag labels for listings
    #[must_use]
    pub fn labels(self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.game_php {
            labels.push("game.php");
        }
        if self.legacy_states {
            labels.push(LEGACY_STATES_FILE);
        }
        if self.state_classes {
            labels.push("State classes");
        }
        labels
    }
}

/// Sorted names of the regular files directly inside `dir`
fn root_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::debug!(?name, "skipping non UTF-8 file name"),
        }
    }
    names.sort();
    Ok(names)
}

/// Game folders inside a workspace, sorted by name
pub fn discover_games(workspace: &Path) -> CliResult<Vec<String>> {
    let mut games = Vec::new();
    for entry in fs::read_dir(workspace)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if GameTags::scan(&entry.path()).is_game() {
            games.push(name);
        }
    }
    games.sort();
    tracing::debug!(workspace = %workspace.display(), found = games.len(), "discovered games");
    Ok(games)
}

/// Pick the project: `--project`, then `--game` in the workspace, then the
/// workspace's only game
pub fn resolve_project(config: &CliConfig, args: &ProjectArgs) -> CliResult<GameProject> {
    if let Some(root) = &args.project {
        if !root.is_dir() {
            return Err(CliError::project_not_found(format!(
                "Project directory `{}` does not exist",
                root.display()
            )));
        }
        let name = root
            .file_name()
            .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());
        tracing::info!(project = %root.display(), "using explicit project");
        return Ok(GameProject {
            name,
            root: root.clone(),
        });
    }

    let Some(workspace) = &config.workspace else {
        return Err(CliError::project_not_found(
            "No --project or --game given and no workspace configured. Pass --project <dir>, or set --workspace / BGA_WORKSPACE_PATH.",
        ));
    };

    if let Some(game) = &args.game {
        let root = workspace.join(game);
        if !root.is_dir() {
            return Err(CliError::project_not_found(format!(
                "Game `{game}` not found in workspace `{}`",
                workspace.display()
            )));
        }
        tracing::info!(game = %game, "using game from workspace");
        return Ok(GameProject {
            name: game.clone(),
            root,
        });
    }

    let games = discover_games(workspace)?;
    match games.as_slice() {
        [only] => {
            tracing::info!(game = %only, "auto-selected the only game in the workspace");
            Ok(GameProject {
                name: only.clone(),
                root: workspace.join(only),
            })
        }
        [] => Err(CliError::project_not_found(format!(
            "No BGA game projects found in `{}`",
            workspace.display()
        ))),
        many => Err(CliError::project_not_found(format!(
            "Multiple BGA games found in the workspace ({}). Pass --game <name> (use `bgalint games` to see available games).",
            many.join(", ")
        ))),
    }
}

/// Read one file, decoding invalid UTF-8 lossily. A failed read is recorded
/// in `sources.unreadable` so the report can show it.
fn read_source(
    sources: &mut ProjectSources,
    path: &Path,
    label: impl Into<String>,
) -> Option<SourceFile> {
    let label = label.into();
    match fs::read(path) {
        Ok(bytes) => {
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(file = %label, "decoding non UTF-8 file lossily");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            Some(SourceFile::new(label, text))
        }
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
            sources.unreadable.push(UnreadableFile {
                path: label,
                reason: e.to_string(),
            });
            None
        }
    }
}

fn is_front_end_script(name: &str) -> bool {
    name.ends_with(".js") && !name.contains(".min.") && name != "Gruntfile.js"
}

fn main_logic_name(files: &[String]) -> Option<&str> {
    files
        .iter()
        .find(|f| *f == "Game.php")
        .or_else(|| files.iter().find(|f| f.ends_with(".game.php")))
        .map(String::as_str)
}

/// Read every source of a project, assigning file roles
pub fn load_sources(root: &Path) -> CliResult<ProjectSources> {
    let files = root_files(root)?;
    let mut sources = ProjectSources::new();

    if files.iter().any(|f| f == LEGACY_STATES_FILE) {
        sources.legacy_states =
            read_source(&mut sources, &root.join(LEGACY_STATES_FILE), LEGACY_STATES_FILE);
    }

    let state_dir = root.join(STATE_CLASS_DIR);
    if state_dir.is_dir() {
        sources.state_class_dir = Some(format!("{STATE_CLASS_DIR}/"));
        for name in root_files(&state_dir)?.into_iter().filter(|f| f.ends_with(".php")) {
            let label = format!("{STATE_CLASS_DIR}/{name}");
            if let Some(file) = read_source(&mut sources, &state_dir.join(&name), label) {
                sources.state_classes.push(file);
            }
        }
    }

    if let Some(name) = files.iter().find(|f| is_front_end_script(f)) {
        sources.front_end = read_source(&mut sources, &root.join(name), name.as_str());
    }

    let main_name = main_logic_name(&files);
    sources.main_logic = match main_name {
        Some(name) => read_source(&mut sources, &root.join(name), name),
        None if root.join(MODERN_MAIN_LOGIC).is_file() => {
            read_source(&mut sources, &root.join(MODERN_MAIN_LOGIC), MODERN_MAIN_LOGIC)
        }
        None => None,
    };

    for name in files.iter().filter(|f| f.ends_with(".php")) {
        if name == LEGACY_STATES_FILE || Some(name.as_str()) == main_name {
            continue;
        }
        if let Some(file) = read_source(&mut sources, &root.join(name), name.as_str()) {
            sources.server_scripts.push(file);
        }
    }

    tracing::debug!(
        legacy = sources.legacy_states.is_some(),
        state_classes = sources.state_classes.len(),
        front_end = ?sources.front_end.as_ref().map(|f| f.path.as_str()),
        main_logic = ?sources.main_logic.as_ref().map(|f| f.path.as_str()),
        server_scripts = sources.server_scripts.len(),
        "resolved file roles"
    );
    Ok(sources)
}
