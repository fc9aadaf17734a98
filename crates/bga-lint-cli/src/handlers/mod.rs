//! Command handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - A pure rendering function returning the text that goes to stdout
//! - Tests against temporary project directories

pub mod actions;
pub mod games;
pub mod migration;
pub mod states;
pub mod validate;

pub use actions::{execute_actions, render_actions};
pub use games::{execute_games, render_games};
pub use migration::{execute_migration_status, render_migration_status};
pub use states::{execute_states, render_states};
pub use validate::{check_outcome, execute_validate, lint_project, render_outcome};

use crate::commands::ProjectArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::StatusReporter;
use crate::project::{load_sources, resolve_project, GameProject};
use bga_lint::ProjectSources;

/// Resolve the selected project and read its sources
pub fn open_project(
    config: &CliConfig,
    target: &ProjectArgs,
) -> CliResult<(GameProject, ProjectSources)> {
    let project = resolve_project(config, target)?;
    let sources = load_sources(&project.root)?;
    Ok((project, sources))
}

/// Status reporter honouring the color and quiet settings
#[must_use]
pub fn reporter(config: &CliConfig) -> StatusReporter {
    StatusReporter::new(config.color.should_color(), config.verbosity.is_quiet())
}

/// Print to stdout, adding a final newline only when missing
pub fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::Path;

    pub const LEGACY_STATES: &str = r#"<?php
$machinestates = [
    1 => [
        "name" => "gameSetup",
        "type" => "manager",
        "action" => "stGameSetup",
        "transitions" => ["" => 10],
    ],
    10 => [
        "name" => "playerTurn",
        "description" => clienttranslate('${actplayer} must play a card'),
        "type" => "activeplayer",
        "possibleactions" => ["actPlayCard"],
        "transitions" => ["next" => 99],
    ],
    99 => [
        "name" => "gameEnd",
        "type" => "manager",
        "action" => "stGameEnd",
    ],
];
"#;

    pub const GAME_PHP: &str = r#"<?php
class Hearts extends Table {
    function actPlayCard($card_id) {
        $this->checkAction('actPlayCard');
        $this->notify->all("cardPlayed", '', []);
    }
    function getGameProgression() {
        return 50;
    }
}
"#;

    pub const FRONT_END: &str = r#"
define([], function () {
    return declare("bgagame.hearts", ebg.core.gamegui, {
        onCardClick: function () {
            this.bgaPerformAction("actPlayCard", { card_id: 1 });
        },
        setupNotifications: function () {
            this.bgaSetupPromiseNotifications();
        },
        notif_cardPlayed: async function (args) {},
    });
});
"#;

    pub fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(path, text).expect("write fixture");
    }

    /// A legacy project that lints clean
    pub fn clean_project(root: &Path) {
        write(root, "states.inc.php", LEGACY_STATES);
        write(root, "hearts.game.php", GAME_PHP);
        write(root, "hearts.js", FRONT_END);
    }
}
