//! Unified state-machine model
//!
//! Both source formats (the legacy `states.inc.php` array and the modern
//! `modules/php/States/*.php` classes) are parsed into [`StateDefinition`]
//! records. The model is built fresh for every analysis and never mutated
//! once the parsers return.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of a state, derived from its declared type string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    /// One active player must act (`activeplayer`, `StateType::ACTIVE_PLAYER`)
    SinglePlayerActive,
    /// Several players act in parallel (`multipleactiveplayer`)
    MultiPlayerActive,
    /// Private parallel state (`private`, `StateType::PRIVATE`)
    Private,
    /// Game-driven state with no player input (`game`, `manager`, anything else)
    Automatic,
}

impl StateKind {
    /// Derive the kind from a free-form type string, case-insensitively.
    ///
    /// Unrecognised values default to [`StateKind::Automatic`].
    #[must_use]
    pub fn from_type_str(raw: &str) -> Self {
        let t = raw.to_ascii_lowercase();
        // "multiple_active_player" also contains "active_player"
        if t == "multipleactiveplayer" || t.contains("multiple_active") {
            Self::MultiPlayerActive
        } else if t == "activeplayer" || t.contains("active_player") {
            Self::SinglePlayerActive
        } else if t.contains("private") {
            Self::Private
        } else {
            Self::Automatic
        }
    }

    /// Whether a player is expected to act in this state
    #[must_use]
    pub const fn is_player_state(self) -> bool {
        matches!(self, Self::SinglePlayerActive | Self::MultiPlayerActive)
    }

    /// Short display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SinglePlayerActive => "active player",
            Self::MultiPlayerActive => "multiple active players",
            Self::Private => "private",
            Self::Automatic => "game",
        }
    }
}

impl std::fmt::Display for StateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which textual format produced a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// `states.inc.php` array literal
    LegacyArray,
    /// One `class X extends GameState` per file
    ModernClass,
}

/// One declared state of the game's state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    /// Numeric state id (uniqueness is checked, not enforced)
    pub id: u32,
    /// State name (legacy) or class name (modern)
    pub name: String,
    /// Derived state kind
    pub kind: StateKind,
    /// Transition label to target state id
    pub transitions: BTreeMap<String, u32>,
    /// Normalised player-invocable action names
    pub declared_actions: Vec<String>,
    /// Whether a `zombie()` fallback exists
    pub has_zombie_handler: bool,
    /// Format that produced this record
    pub source_kind: SourceKind,
    /// File path, for attribution only
    pub source_location: String,
    /// Declared class name (modern format only)
    pub declared_class_name: Option<String>,
    /// Legacy `description`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Legacy `descriptionmyturn`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_my_turn: Option<String>,
    /// Legacy `action` callback, kept for traceability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_callback: Option<String>,
}

impl StateDefinition {
    /// Create a definition with no transitions, actions or zombie handler
    pub fn new(
        id: u32,
        name: impl Into<String>,
        kind: StateKind,
        source_kind: SourceKind,
        source_location: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            transitions: BTreeMap::new(),
            declared_actions: Vec::new(),
            has_zombie_handler: false,
            source_kind,
            source_location: source_location.into(),
            declared_class_name: None,
            description: None,
            description_my_turn: None,
            legacy_callback: None,
        }
    }

    /// Add a transition
    #[must_use]
    pub fn with_transition(mut self, label: impl Into<String>, target: u32) -> Self {
        self.transitions.insert(label.into(), target);
        self
    }

    /// Add a declared action (normalised on insert)
    #[must_use]
    pub fn with_action(mut self, action: &str) -> Self {
        push_unique(&mut self.declared_actions, normalize_action(action));
        self
    }

    /// Set the zombie handler flag
    #[must_use]
    pub const fn with_zombie_handler(mut self, present: bool) -> Self {
        self.has_zombie_handler = present;
        self
    }

    /// Set the declared class name
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.declared_class_name = Some(class_name.into());
        self
    }

    /// Whether this record came from a state class file
    #[must_use]
    pub fn is_modern(&self) -> bool {
        self.source_kind == SourceKind::ModernClass
    }
}

/// Normalise an action name to its canonical form.
///
/// A leading `act` prefix followed by an uppercase letter is stripped and the
/// next character lower-cased, repeatedly, so the result is a fixed point:
/// `actPlayCard` and `playCard` both become `playCard`.
#[must_use]
pub fn normalize_action(name: &str) -> String {
    let mut current = name.to_string();
    while let Some(rest) = current.strip_prefix("act") {
        let mut chars = rest.chars();
        match chars.next() {
            Some(first) if first.is_ascii_uppercase() => {
                current = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
            }
            _ => break,
        }
    }
    current
}

/// Method name that implements a normalised action (`playCard` -> `actPlayCard`)
#[must_use]
pub fn action_method_name(action: &str) -> String {
    let normalized = normalize_action(action);
    let mut chars = normalized.chars();
    match chars.next() {
        Some(first) => format!("act{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => "act".to_string(),
    }
}

/// Push onto `items` unless already present, keeping discovery order
pub(crate) fn push_unique(items: &mut Vec<String>, item: String) {
    if !items.contains(&item) {
        items.push(item);
    }
}
