//! Migration status scan
//!
//! Classifies a project as legacy, modern, or in between by counting old and
//! new framework idioms in each source role.

use crate::config::LinterConfig;
use crate::parse::{count_possible_action_markers, parse_legacy_states};
use crate::sources::ProjectSources;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static CHECK_ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"checkAction\s*\(").expect("valid regex"));
static NEXT_STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gamestate\s*->\s*nextState\s*\(").expect("valid regex"));
static SETUP_RETURN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)function\s+setupNewGame.{0,500}?return\s+([^;]+);").expect("valid regex")
});
static SUBSCRIBE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"notifqueue\.subscribe").expect("valid regex"));
static PROMISE_NOTIF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bgaSetupPromiseNotifications").expect("valid regex"));
static AJAXCALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ajaxcall\s*\(").expect("valid regex"));
static PERFORM_ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"bgaPerformAction\s*\(").expect("valid regex"));

/// Overall migration verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationStatus {
    /// Only modern idioms found
    FullyMigrated,
    /// Only legacy idioms found
    NotStarted,
    /// A mix, or nothing conclusive
    PartiallyMigrated,
}

impl MigrationStatus {
    /// Get display string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullyMigrated => "Fully migrated to State classes",
            Self::NotStarted => "Not yet started",
            Self::PartiallyMigrated => "Partially migrated",
        }
    }
}

impl std::fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Findings of one migration scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Overall verdict
    pub status: MigrationStatus,
    /// Modern idioms already in place
    pub modern: Vec<String>,
    /// Legacy idioms still to migrate
    pub pending: Vec<String>,
    /// Supporting details
    pub details: Vec<String>,
}

impl MigrationReport {
    fn classify(modern: &[String], pending: &[String]) -> MigrationStatus {
        match (modern.is_empty(), pending.is_empty()) {
            (false, true) => MigrationStatus::FullyMigrated,
            (true, false) => MigrationStatus::NotStarted,
            _ => MigrationStatus::PartiallyMigrated,
        }
    }
}

fn count(re: &Regex, text: &str) -> usize {
    re.find_iter(text).count()
}

/// Scan a project for legacy and modern framework idioms
#[must_use]
pub fn scan_migration(sources: &ProjectSources, config: &LinterConfig) -> MigrationReport {
    let mut modern = Vec::new();
    let mut pending = Vec::new();
    let mut details = Vec::new();

    let mut legacy_state_count = 0;
    match &sources.legacy_states {
        Some(file) => {
            pending.push(format!(
                "`{}` exists: states are defined as legacy PHP arrays. Each non-reserved state should become a State class.",
                file.path
            ));
            let states = parse_legacy_states(&file.text, &file.path);
            legacy_state_count = states.len();
            let migratable: Vec<String> = states
                .iter()
                .filter(|s| !config.is_reserved(s.id))
                .map(|s| format!("`{}` (id={})", s.name, s.id))
                .collect();
            if !migratable.is_empty() {
                details.push(format!("States to convert: {}", migratable.join(", ")));
            }
        }
        None => modern.push(
            "`states.inc.php` not found: states are likely managed by State classes already."
                .to_string(),
        ),
    }

    match &sources.state_class_dir {
        Some(dir) if !sources.state_classes.is_empty() => {
            let names: Vec<String> = sources
                .state_classes
                .iter()
                .map(|f| format!("`{}`", f.file_name()))
                .collect();
            modern.push(format!(
                "`{dir}` exists with {} State class file(s): {}",
                names.len(),
                names.join(", ")
            ));
        }
        Some(dir) => details.push(format!(
            "`{dir}` directory exists but is empty: no State classes yet."
        )),
        None if legacy_state_count > 0 => pending.push(
            "`modules/php/States/` directory does not exist: create it and add State classes."
                .to_string(),
        ),
        None => {}
    }

    if let Some(main) = &sources.main_logic {
        let name = main.file_name();
        let checks = count(&CHECK_ACTION_RE, &main.text);
        if checks > 0 {
            pending.push(format!(
                "`{name}` contains {checks} `checkAction()` call(s). Move actions into State classes with `#[PossibleAction]`."
            ));
        }
        let next_states = count(&NEXT_STATE_RE, &main.text);
        if next_states > 0 {
            pending.push(format!(
                "`{name}` calls `gamestate->nextState()` {next_states} time(s). State class actions should return a transition string or class name directly."
            ));
        }
        match SETUP_RETURN_RE.captures(&main.text) {
            Some(caps) => {
                let returned = caps[1].trim();
                if returned.contains("::class") {
                    modern.push(format!("`{name}`: `setupNewGame` returns `{returned}`"));
                } else {
                    pending.push(format!(
                        "`{name}`: `setupNewGame` does not return an initial State class. Modern pattern: `return PlayerTurn::class;`"
                    ));
                }
            }
            None if main.text.contains("setupNewGame") => pending.push(format!(
                "`{name}`: `setupNewGame` has no `return` statement. Modern pattern: `return PlayerTurn::class;`"
            )),
            None => {}
        }
        let markers = count_possible_action_markers(&main.text);
        if markers > 0 {
            modern.push(format!(
                "`{name}` uses `#[PossibleAction]` ({markers} occurrence(s))"
            ));
        }
    }

    let class_markers: usize = sources
        .state_classes
        .iter()
        .map(|f| count_possible_action_markers(&f.text))
        .sum();
    if class_markers > 0 {
        modern.push(format!(
            "State class files contain {class_markers} `#[PossibleAction]` method(s)"
        ));
    }

    if let Some(js) = &sources.front_end {
        let name = js.file_name();
        let subscribes = count(&SUBSCRIBE_RE, &js.text);
        if subscribes > 0 {
            pending.push(format!(
                "`{name}` uses `notifqueue.subscribe` ({subscribes} call(s)). Replace with `bgaSetupPromiseNotifications({{ ... }})`."
            ));
        }
        let promises = count(&PROMISE_NOTIF_RE, &js.text);
        if promises > 0 {
            modern.push(format!(
                "`{name}` uses `bgaSetupPromiseNotifications` ({promises} call(s))"
            ));
        }
        let ajax = count(&AJAXCALL_RE, &js.text);
        if ajax > 0 {
            pending.push(format!(
                "`{name}` uses `ajaxcall()` ({ajax} call(s)). Replace with `bgaPerformAction('actionName', {{ ... }})`."
            ));
        }
        let performs = count(&PERFORM_ACTION_RE, &js.text);
        if performs > 0 {
            modern.push(format!("`{name}` uses `bgaPerformAction` ({performs} call(s))"));
        }
    }

    let status = MigrationReport::classify(&modern, &pending);
    tracing::debug!(%status, modern = modern.len(), pending = pending.len(), "migration scan");
    MigrationReport {
        status,
        modern,
        pending,
        details,
    }
}

/// Render a migration report as text
#[must_use]
pub fn render_migration(report: &MigrationReport, project_label: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("MIGRATION STATUS: {project_label}\n"));
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    let status = match report.status {
        MigrationStatus::FullyMigrated => format!("✓ Status: {}", report.status),
        MigrationStatus::NotStarted => {
            format!("✗ Status: {}, no modern patterns detected", report.status)
        }
        MigrationStatus::PartiallyMigrated => format!(
            "⚠ Status: {}, {} issue(s) remaining",
            report.status,
            report.pending.len()
        ),
    };
    output.push_str(&status);
    output.push_str("\n\n");

    for (heading, symbol, items) in [
        ("Already modern", "✓", &report.modern),
        ("Details", "-", &report.details),
        ("Needs migration", "⚠", &report.pending),
    ] {
        if items.is_empty() {
            continue;
        }
        output.push_str(&format!("{heading}:\n"));
        for item in items {
            output.push_str(&format!("  {symbol} {item}\n"));
        }
        output.push('\n');
    }

    output
}

/// Render a migration report as JSON
pub fn render_migration_json(report: &MigrationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const LEGACY_STATES: &str = "$machinestates = [\n    1 => [\n        \"name\" => \"gameSetup\",\n    ],\n    2 => [\n        \"name\" => \"playerTurn\",\n    ],\n    99 => [\n        \"name\" => \"gameEnd\",\n    ],\n];\n";

    const LEGACY_GAME: &str = r#"
        protected function setupNewGame($players, $options = []) {
            $this->activeFirstPlayer();
        }
        function playCard($id) {
            self::checkAction('playCard');
            $this->gamestate->nextState('next');
        }
    "#;

    fn scan(sources: &ProjectSources) -> MigrationReport {
        scan_migration(sources, &LinterConfig::default())
    }

    #[test]
    fn test_legacy_project_not_started() {
        let sources = ProjectSources::new()
            .with_legacy_states("states.inc.php", LEGACY_STATES)
            .with_main_logic("mygame.game.php", LEGACY_GAME)
            .with_front_end(
                "mygame.js",
                "dojo.subscribe(); this.notifqueue.subscribe('x'); this.ajaxcall('/a/b/c.html');",
            );
        let report = scan(&sources);
        assert_eq!(report.status, MigrationStatus::NotStarted);
        assert!(report.modern.is_empty());
        assert_eq!(report.pending.len(), 7);
        assert_eq!(report.details, vec!["States to convert: `playerTurn` (id=2)"]);
        assert!(report.pending.iter().any(|p| p.contains("1 `checkAction()` call(s)")));
        assert!(report.pending.iter().any(|p| p.contains("has no `return` statement")));
    }

    #[test]
    fn test_modern_project_fully_migrated() {
        let sources = ProjectSources::new()
            .with_state_class_dir("modules/php/States/")
            .with_state_class(
                "modules/php/States/PlayerTurn.php",
                "#[PossibleAction]\npublic function actPass() {}\n#[PossibleAction]\npublic function actPlay() {}",
            )
            .with_main_logic(
                "modules/php/Game.php",
                "protected function setupNewGame($players, $options = []) { return PlayerTurn::class; }",
            )
            .with_front_end(
                "mygame.js",
                "this.bgaSetupPromiseNotifications(); this.bgaPerformAction('actPass');",
            );
        let report = scan(&sources);
        assert_eq!(report.status, MigrationStatus::FullyMigrated);
        assert!(report.pending.is_empty());
        assert!(report
            .modern
            .iter()
            .any(|m| m.contains("returns `PlayerTurn::class`")));
        assert!(report.modern.iter().any(|m| m.contains("2 `#[PossibleAction]` method(s)")));
    }

    #[test]
    fn test_mixed_project_partial() {
        let sources = ProjectSources::new()
            .with_legacy_states("states.inc.php", LEGACY_STATES)
            .with_state_class_dir("modules/php/States/")
            .with_state_class("modules/php/States/PlayerTurn.php", "");
        let report = scan(&sources);
        assert_eq!(report.status, MigrationStatus::PartiallyMigrated);
        let text = render_migration(&report, "mygame");
        assert!(text.contains("Partially migrated, 1 issue(s) remaining"));
        assert!(text.contains("Already modern:"));
        assert!(text.contains("Needs migration:"));
    }

    #[test]
    fn test_empty_state_directory_is_detail() {
        let sources = ProjectSources::new().with_state_class_dir("modules/php/States/");
        let report = scan(&sources);
        assert!(report.details[0].contains("exists but is empty"));
    }

    #[test]
    fn test_missing_state_directory_pending_only_with_legacy_states() {
        let sources = ProjectSources::new().with_legacy_states("states.inc.php", LEGACY_STATES);
        let report = scan(&sources);
        assert!(report.pending.iter().any(|p| p.contains("does not exist")));

        let sources = ProjectSources::new().with_legacy_states("states.inc.php", "garbage");
        let report = scan(&sources);
        assert!(!report.pending.iter().any(|p| p.contains("does not exist")));
    }

    #[test]
    fn test_json_status() {
        let report = scan(&ProjectSources::new());
        let json = render_migration_json(&report).unwrap();
        assert!(json.contains("\"status\": \"fully_migrated\""));
    }
}
