//! Source parsers
//!
//! | Format | Function | Yields |
//! |--------|----------|--------|
//! | `states.inc.php` array | [`parse_legacy_states`] | zero or more states |
//! | `class X extends GameState` | [`parse_state_class`] | one state or `None` |
//!
//! Both are text pattern matchers, not grammars. They never fail: blocks that
//! do not have the expected shape are skipped.

mod legacy;
mod modern;

pub use legacy::parse_legacy_states;
pub use modern::{
    count_possible_action_markers, has_possible_action_import, has_possible_action_marker,
    parse_state_class,
};

use crate::model::StateDefinition;
use crate::sources::ProjectSources;
use crate::Diagnostic;

/// Rule code for a state class file that could not be parsed
pub const UNPARSABLE_STATE_CLASS: &str = "STATE000";

/// Parse every state source into the unified model.
///
/// Unparsable state class files are excluded from the model and reported as
/// Info diagnostics (returned second).
#[must_use]
pub fn parse_sources(sources: &ProjectSources) -> (Vec<StateDefinition>, Vec<Diagnostic>) {
    let mut states = Vec::new();
    let mut notes = Vec::new();

    if let Some(legacy) = &sources.legacy_states {
        let parsed = parse_legacy_states(&legacy.text, &legacy.path);
        tracing::debug!(file = %legacy.path, states = parsed.len(), "parsed legacy states");
        states.extend(parsed);
    }

    for file in &sources.state_classes {
        match parse_state_class(&file.text, &file.path) {
            Some(state) => {
                tracing::debug!(file = %file.path, id = state.id, "parsed state class");
                states.push(state);
            }
            None => {
                tracing::debug!(file = %file.path, "state class not recognised");
                notes.push(Diagnostic::info(
                    &file.path,
                    UNPARSABLE_STATE_CLASS,
                    format!(
                        "Could not parse `{}` as a State class (no `class X extends GameState` with `id:` and `type:` found).",
                        file.file_name()
                    ),
                ));
            }
        }
    }

    (states, notes)
}
