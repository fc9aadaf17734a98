//! Modern State class parser
//!
//! One file under `modules/php/States/` declares one state:
//!
//! ```php
//! class PlayerTurn extends GameState
//! {
//!     function __construct(protected Game $game) {
//!         parent::__construct($game,
//!             id: 10,
//!             type: StateType::ACTIVE_PLAYER,
//!             transitions: ['pass' => 20],
//!         );
//!     }
//!
//!     #[PossibleAction]
//!     public function actPass(int $activePlayerId): string { return 'pass'; }
//!
//!     public function zombie(int $playerId): string { return 'pass'; }
//! }
//! ```

use crate::model::{SourceKind, StateDefinition, StateKind};
use regex::Regex;
use std::sync::LazyLock;

static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bid\s*:\s*(\d+)").expect("valid regex"));
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\btype\s*:\s*(StateType::\w+)").expect("valid regex"));
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"class\s+(\w+)\s+extends\s+GameState\b").expect("valid regex"));
static TRANSITIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\btransitions\s*:\s*\[(.*?)\]").expect("valid regex"));
static TRANSITION_ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'([^']+)'\s*=>\s*(\d+)|"([^"]+)"\s*=>\s*(\d+)"#).expect("valid regex")
});
static POSSIBLE_ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#\[PossibleAction\]\s*(?://[^\n]*)?\s*public\s+function\s+act(\w+)\s*\(")
        .expect("valid regex")
});
static ZOMBIE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"public\s+function\s+zombie\s*\(").expect("valid regex"));
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\[PossibleAction\]").expect("valid regex"));
static MARKER_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"use\s+\\?Bga\\GameFramework\\States\\PossibleAction\b").expect("valid regex")
});

/// Lower-case the first character (`PlayCard` -> `playCard`)
fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Parse one state class file.
///
/// Returns `None` when the id, the `StateType::` token or the class
/// declaration cannot be found.
#[must_use]
pub fn parse_state_class(text: &str, location: &str) -> Option<StateDefinition> {
    let id = ID_RE.captures(text)?.get(1)?.as_str().parse::<u32>().ok()?;
    let type_token = TYPE_RE.captures(text)?.get(1)?.as_str().to_string();
    let class_name = CLASS_RE.captures(text)?.get(1)?.as_str().to_string();

    let mut state = StateDefinition::new(
        id,
        class_name.clone(),
        StateKind::from_type_str(&type_token),
        SourceKind::ModernClass,
        location,
    )
    .with_class_name(class_name)
    .with_zombie_handler(ZOMBIE_RE.is_match(text));

    if let Some(list) = TRANSITIONS_RE.captures(text).and_then(|c| c.get(1)) {
        for entry in TRANSITION_ENTRY_RE.captures_iter(list.as_str()) {
            let (label, target) = match (entry.get(1), entry.get(2), entry.get(3), entry.get(4)) {
                (Some(label), Some(target), _, _) | (_, _, Some(label), Some(target)) => {
                    (label.as_str(), target.as_str())
                }
                _ => continue,
            };
            if let Ok(target) = target.parse::<u32>() {
                state.transitions.insert(label.to_string(), target);
            }
        }
    }

    // The pattern guarantees the `act` prefix, so strip it unconditionally:
    // `actplayCard` must still map to `playCard` and then fail the method lookup.
    for action in POSSIBLE_ACTION_RE.captures_iter(text) {
        let normalized = lower_first(&action[1]);
        if !state.declared_actions.contains(&normalized) {
            state.declared_actions.push(normalized);
        }
    }

    Some(state)
}

/// Whether the file carries a `#[PossibleAction]` marker
#[must_use]
pub fn has_possible_action_marker(text: &str) -> bool {
    MARKER_RE.is_match(text)
}

/// Whether the file imports the `PossibleAction` attribute type
#[must_use]
pub fn has_possible_action_import(text: &str) -> bool {
    MARKER_IMPORT_RE.is_match(text)
}

/// Number of `#[PossibleAction]` markers in the file
#[must_use]
pub fn count_possible_action_markers(text: &str) -> usize {
    MARKER_RE.find_iter(text).count()
}
