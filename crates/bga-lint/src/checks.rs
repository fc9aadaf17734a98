//! Check battery
//!
//! Checks run in a fixed order and push findings in discovery order. The
//! report groups them by severity afterwards.

use crate::config::LinterConfig;
use crate::diagnostic::Diagnostic;
use crate::model::{action_method_name, normalize_action, push_unique, StateDefinition};
use crate::parse::{has_possible_action_import, has_possible_action_marker};
use crate::scan;
use crate::sources::ProjectSources;
use regex::Regex;
use std::collections::BTreeSet;

/// Stable rule codes
pub mod codes {
    /// Two or more definitions share an id
    pub const DUPLICATE_ID: &str = "STATE001";
    /// Transition target id is not declared
    pub const BROKEN_TRANSITION: &str = "STATE002";
    /// State is never a transition target
    pub const UNREACHABLE_STATE: &str = "STATE003";
    /// Player state class without `zombie()`
    pub const MISSING_ZOMBIE: &str = "STATE004";
    /// File name differs from declared class name
    pub const CLASS_NAME_MISMATCH: &str = "STATE005";
    /// Reserved id carries an unconventional name
    pub const RESERVED_NAME: &str = "STATE006";
    /// `#[PossibleAction]` used without its import
    pub const MISSING_IMPORT: &str = "STATE010";
    /// Declared action has no method
    pub const MISSING_ACTION_METHOD: &str = "STATE011";
    /// Front end calls an action with no back-end handler
    pub const UNKNOWN_ACTION: &str = "ACTION001";
    /// Back-end action never called from the front end
    pub const UNCALLED_ACTION: &str = "ACTION002";
    /// Notification sent with no front-end handler
    pub const UNHANDLED_NOTIFICATION: &str = "NOTIF001";
    /// Front-end handler with no sender
    pub const UNSENT_NOTIFICATION: &str = "NOTIF002";
    /// `getGameProgression()` always returns zero
    pub const PROGRESSION_STUB: &str = "GAME001";
    /// Source file could not be read
    pub const UNREADABLE_FILE: &str = "IO001";
}

/// Runs every check over one parsed model
#[derive(Debug)]
pub struct CheckBattery<'a> {
    states: &'a [StateDefinition],
    sources: &'a ProjectSources,
    config: &'a LinterConfig,
    declared_ids: BTreeSet<u32>,
}

impl<'a> CheckBattery<'a> {
    /// Prepare a battery; reserved ids always count as declared
    #[must_use]
    pub fn new(
        states: &'a [StateDefinition],
        sources: &'a ProjectSources,
        config: &'a LinterConfig,
    ) -> Self {
        let declared_ids = states
            .iter()
            .map(|s| s.id)
            .chain(config.reserved_ids())
            .collect();
        Self {
            states,
            sources,
            config,
            declared_ids,
        }
    }

    /// Run all checks in report order
    #[must_use]
    pub fn run(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        self.check_duplicate_ids(&mut out);
        self.check_broken_transitions(&mut out);
        self.check_unreachable_states(&mut out);
        self.check_zombie_handlers(&mut out);
        self.check_class_names(&mut out);
        self.check_reserved_names(&mut out);
        self.check_actions(&mut out);
        self.check_notifications(&mut out);
        self.check_progression(&mut out);
        self.check_action_imports(&mut out);
        self.check_action_methods(&mut out);
        out
    }

    fn check_duplicate_ids(&self, out: &mut Vec<Diagnostic>) {
        let mut groups: Vec<(u32, Vec<&str>)> = Vec::new();
        for state in self.states {
            let location = state.source_location.as_str();
            match groups.iter_mut().find(|(id, _)| *id == state.id) {
                Some((_, files)) => files.push(location),
                None => groups.push((state.id, vec![location])),
            }
        }

        let before = out.len();
        for (id, files) in groups.into_iter().filter(|(_, files)| files.len() > 1) {
            let quoted: Vec<String> = files.iter().map(|f| format!("`{f}`")).collect();
            out.push(
                Diagnostic::error(
                    files.join(", "),
                    codes::DUPLICATE_ID,
                    format!("Duplicate state ID {id} declared in: {}", quoted.join(" and ")),
                )
                .with_hint("Each state must have a unique numeric ID."),
            );
        }
        tracing::debug!(found = out.len() - before, "duplicate id check");
    }

    fn check_broken_transitions(&self, out: &mut Vec<Diagnostic>) {
        for state in self.states {
            for (label, target) in &state.transitions {
                if self.declared_ids.contains(target) {
                    continue;
                }
                out.push(
                    Diagnostic::error(
                        &state.source_location,
                        codes::BROKEN_TRANSITION,
                        format!(
                            "State `{}` (id={}): transition `'{label}'` points to id={target} which does not exist.",
                            state.name, state.id
                        ),
                    )
                    .with_hint("Check the transitions map. The target state ID is not declared anywhere in the project."),
                );
            }
        }
    }

    fn check_unreachable_states(&self, out: &mut Vec<Diagnostic>) {
        let referenced: BTreeSet<u32> = self
            .states
            .iter()
            .flat_map(|s| s.transitions.values().copied())
            .chain(self.config.reserved_ids())
            .collect();

        for state in self.states {
            if referenced.contains(&state.id) || self.config.is_reserved(state.id) {
                continue;
            }
            out.push(
                Diagnostic::warning(
                    &state.source_location,
                    codes::UNREACHABLE_STATE,
                    format!(
                        "State `{}` (id={}) is never referenced as a transition target, so it may be unreachable.",
                        state.name, state.id
                    ),
                )
                .with_hint("Either another state should transition to this one, or it can be deleted."),
            );
        }
    }

    // Legacy records have no method bodies to inspect
    fn check_zombie_handlers(&self, out: &mut Vec<Diagnostic>) {
        for state in self.states {
            if !state.is_modern() || !state.kind.is_player_state() || state.has_zombie_handler {
                continue;
            }
            out.push(
                Diagnostic::warning(
                    &state.source_location,
                    codes::MISSING_ZOMBIE,
                    format!(
                        "State class `{}` (id={}) is a player state but has no `zombie()` method.",
                        state.name, state.id
                    ),
                )
                .with_hint("Add a `public function zombie(int $playerId): string` method to handle disconnected players."),
            );
        }
    }

    fn check_class_names(&self, out: &mut Vec<Diagnostic>) {
        for state in self.states.iter().filter(|s| s.is_modern()) {
            let Some(class_name) = &state.declared_class_name else {
                continue;
            };
            let stem = base_name(&state.source_location);
            if stem == class_name.as_str() {
                continue;
            }
            out.push(
                Diagnostic::error(
                    &state.source_location,
                    codes::CLASS_NAME_MISMATCH,
                    format!("File is named `{stem}.php` but declares class `{class_name}`."),
                )
                .with_hint("BGA autoloads State classes by filename. Rename the file to match the class name (or vice versa)."),
            );
        }
    }

    fn check_reserved_names(&self, out: &mut Vec<Diagnostic>) {
        let initial = self.config.initial_state_id;
        let terminal = self.config.terminal_state_id;
        let setup = &self.config.setup_state_name;
        let end_names = &self.config.end_state_names;

        for state in self.states.iter().filter(|s| !s.is_modern()) {
            if state.id == initial && &state.name != setup {
                out.push(Diagnostic::warning(
                    &state.source_location,
                    codes::RESERVED_NAME,
                    format!(
                        "State id={initial} is named `{}`, but BGA reserves id={initial} for `{setup}`.",
                        state.name
                    ),
                ));
            }
            if state.id == terminal && !end_names.contains(&state.name) {
                let expected = end_names.first().map_or("gameEnd", String::as_str);
                out.push(Diagnostic::warning(
                    &state.source_location,
                    codes::RESERVED_NAME,
                    format!(
                        "State id={terminal} is named `{}`, but BGA reserves id={terminal} for `{expected}`.",
                        state.name
                    ),
                ));
            }
        }
    }

    fn check_actions(&self, out: &mut Vec<Diagnostic>) {
        let Some(front_end) = &self.sources.front_end else {
            return;
        };
        let called = scan::front_end_actions(&front_end.text);
        let called_normalized: Vec<String> = called.iter().map(|a| normalize_action(a)).collect();

        let mut handled: Vec<String> = Vec::new();
        for state in self.states {
            for action in &state.declared_actions {
                push_unique(&mut handled, normalize_action(action));
            }
        }
        if let Some(main) = &self.sources.main_logic {
            for action in scan::list_player_actions(&main.text) {
                push_unique(&mut handled, action.normalized());
            }
        }
        tracing::debug!(called = called.len(), handled = handled.len(), "action cross-reference");

        for (raw, normalized) in called.iter().zip(&called_normalized) {
            if handled.contains(normalized) {
                continue;
            }
            out.push(
                Diagnostic::error(
                    &front_end.path,
                    codes::UNKNOWN_ACTION,
                    format!(
                        "JS calls `bgaPerformAction('{raw}', ...)` but no matching `{}` PHP method was found.",
                        action_method_name(raw)
                    ),
                )
                .with_hint("Add a `#[PossibleAction]` method in the appropriate State class, or check for a typo."),
            );
        }

        if called.is_empty() {
            return;
        }
        for action in handled.iter().filter(|a| !called_normalized.contains(a)) {
            out.push(
                Diagnostic::info(
                    &front_end.path,
                    codes::UNCALLED_ACTION,
                    format!(
                        "PHP action `{}` has no corresponding `bgaPerformAction('{action}', ...)` call in `{}`.",
                        action_method_name(action),
                        front_end.file_name()
                    ),
                )
                .with_hint("The action may be invoked another way, or the JS call is missing."),
            );
        }
    }

    fn check_notifications(&self, out: &mut Vec<Diagnostic>) {
        let Some(front_end) = &self.sources.front_end else {
            return;
        };
        let handled = scan::notification_handlers(&front_end.text);

        let mut sent: Vec<String> = Vec::new();
        for file in self.sources.server_files() {
            for name in scan::sent_notifications(&file.text) {
                push_unique(&mut sent, name);
            }
        }
        tracing::debug!(sent = sent.len(), handled = handled.len(), "notification cross-reference");

        for name in &sent {
            if self.config.is_builtin_notification(name) || handled.contains(name) {
                continue;
            }
            out.push(
                Diagnostic::warning(
                    &front_end.path,
                    codes::UNHANDLED_NOTIFICATION,
                    format!(
                        "PHP sends notification `'{name}'` but no JS handler was found in `{}`.",
                        front_end.file_name()
                    ),
                )
                .with_hint("Add a handler in `bgaSetupPromiseNotifications` (or old-style `notifqueue.subscribe`)."),
            );
        }

        for name in handled.iter().filter(|n| !sent.contains(n)) {
            out.push(
                Diagnostic::info(
                    &front_end.path,
                    codes::UNSENT_NOTIFICATION,
                    format!(
                        "JS handles notification `'{name}'` but no PHP `notify->all` / `notifyAllPlayers` call was found for it."
                    ),
                )
                .with_hint("The PHP side may be missing a notification send, or the handler is no longer needed."),
            );
        }
    }

    fn check_progression(&self, out: &mut Vec<Diagnostic>) {
        let Some(main) = &self.sources.main_logic else {
            return;
        };
        if scan::is_progression_stub(&main.text) {
            out.push(
                Diagnostic::info(
                    &main.path,
                    codes::PROGRESSION_STUB,
                    "`getGameProgression()` always returns `0`, so the progress bar will never advance.",
                )
                .with_hint("Implement a meaningful progression calculation (0 to 100) based on game state."),
            );
        }
    }

    // Includes files the class parser could not recognise
    fn check_action_imports(&self, out: &mut Vec<Diagnostic>) {
        for file in &self.sources.state_classes {
            if has_possible_action_marker(&file.text) && !has_possible_action_import(&file.text) {
                out.push(
                    Diagnostic::error(
                        &file.path,
                        codes::MISSING_IMPORT,
                        format!(
                            "`{}` uses `#[PossibleAction]` but is missing: `use Bga\\GameFramework\\States\\PossibleAction;`",
                            file.file_name()
                        ),
                    )
                    .with_hint("Add the `use` statement at the top of the class file."),
                );
            }
        }
    }

    fn check_action_methods(&self, out: &mut Vec<Diagnostic>) {
        for state in self.states.iter().filter(|s| s.is_modern()) {
            let Some(file) = self.sources.state_class(&state.source_location) else {
                continue;
            };
            for action in &state.declared_actions {
                let method = action_method_name(action);
                if has_method(&file.text, &method) {
                    continue;
                }
                out.push(
                    Diagnostic::error(
                        &state.source_location,
                        codes::MISSING_ACTION_METHOD,
                        format!(
                            "State `{}` declares `#[PossibleAction]` for `{method}` but no such method exists in the file.",
                            state.name
                        ),
                    )
                    .with_hint(format!(
                        "Add a `public function {method}(int $activePlayerId): string` method."
                    )),
                );
            }
        }
    }
}

fn base_name(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    name.strip_suffix(".php").unwrap_or(name)
}

fn has_method(text: &str, method: &str) -> bool {
    Regex::new(&format!(r"function\s+{}\s*\(", regex::escape(method)))
        .is_ok_and(|re| re.is_match(text))
}
