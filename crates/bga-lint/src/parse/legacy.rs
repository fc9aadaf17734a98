//! Legacy `states.inc.php` parser
//!
//! The file is a PHP array literal keyed by numeric state id:
//!
//! ```php
//! $machinestates = [
//!     2 => [
//!         "name" => "playerTurn",
//!         "type" => "activeplayer",
//!         "possibleactions" => ["actPlayCard", "actPass"],
//!         "transitions" => ["playCard" => 3, "pass" => 3],
//!     ],
//! ];
//! ```
//!
//! A block runs from `<id> => [` to the next line starting with `<id> =>`, the
//! closing `];` of the array, or end of file.

use crate::model::{SourceKind, StateDefinition, StateKind};
use regex::Regex;
use std::sync::LazyLock;

static BLOCK_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*=>\s*\[").expect("valid regex"));
static BLOCK_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\d+\s*=>|\n\];").expect("valid regex"));

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| string_field_regex("name"));
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| string_field_regex("type"));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| string_field_regex("description"));
static DESCRIPTION_MY_TURN_RE: LazyLock<Regex> =
    LazyLock::new(|| string_field_regex("descriptionmyturn"));
static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| string_field_regex("action"));

static TRANSITIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"transitions"\s*=>\s*\[(.*?)\]"#).expect("valid regex")
});
static TRANSITION_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"\s*=>\s*(\d+)"#).expect("valid regex"));
static POSSIBLE_ACTIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"possibleactions"\s*=>\s*\[(.*?)\]"#).expect("valid regex")
});
static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid regex"));

fn string_field_regex(key: &str) -> Regex {
    Regex::new(&format!(r#""{key}"\s*=>\s*"([^"]*)""#)).expect("valid regex")
}

fn string_field(body: &str, re: &Regex) -> String {
    re.captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Split the file into `(id, body)` blocks
fn blocks(text: &str) -> Vec<(&str, &str)> {
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(caps) = BLOCK_HEADER_RE.captures_at(text, pos) {
        let (Some(header), Some(id)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let body_start = header.end();
        let body_end = BLOCK_END_RE
            .find_at(text, body_start)
            .map_or(text.len(), |m| m.start());
        out.push((id.as_str(), &text[body_start..body_end]));
        pos = body_end;
    }
    out
}

fn parse_block(id: u32, body: &str, location: &str) -> Option<StateDefinition> {
    let name = string_field(body, &NAME_RE);
    if name.is_empty() {
        return None;
    }
    let type_str = string_field(body, &TYPE_RE);

    let mut state = StateDefinition::new(
        id,
        name,
        StateKind::from_type_str(&type_str),
        SourceKind::LegacyArray,
        location,
    );

    if let Some(list) = TRANSITIONS_RE.captures(body).and_then(|c| c.get(1)) {
        for entry in TRANSITION_ENTRY_RE.captures_iter(list.as_str()) {
            match entry[2].parse::<u32>() {
                Ok(target) => {
                    state.transitions.insert(entry[1].to_string(), target);
                }
                Err(_) => {
                    tracing::debug!(state = id, label = &entry[1], "transition target out of range");
                }
            }
        }
    }

    if let Some(list) = POSSIBLE_ACTIONS_RE.captures(body).and_then(|c| c.get(1)) {
        for action in QUOTED_RE.captures_iter(list.as_str()) {
            state = state.with_action(&action[1]);
        }
    }

    state.description = non_empty(string_field(body, &DESCRIPTION_RE));
    state.description_my_turn = non_empty(string_field(body, &DESCRIPTION_MY_TURN_RE));
    state.legacy_callback = non_empty(string_field(body, &ACTION_RE));

    Some(state)
}

/// Parse every state block of a `states.inc.php` file.
///
/// Blocks without a non-empty `"name"` are incomplete fragments and are
/// dropped, as are blocks whose id does not fit in a `u32`.
#[must_use]
pub fn parse_legacy_states(text: &str, location: &str) -> Vec<StateDefinition> {
    blocks(text)
        .into_iter()
        .filter_map(|(raw_id, body)| {
            let Ok(id) = raw_id.parse::<u32>() else {
                tracing::debug!(raw_id, "skipping block with out-of-range id");
                return None;
            };
            let state = parse_block(id, body, location);
            if state.is_none() {
                tracing::debug!(id, "skipping block without a name");
            }
            state
        })
        .collect()
}
