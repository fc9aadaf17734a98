//! State machine overview
//!
//! Lists every recovered state without running any checks.

use crate::model::StateDefinition;
use crate::parse::parse_sources;
use crate::result::{LintError, LintResult};
use crate::sources::ProjectSources;
use serde::Serialize;

/// Parsed states of one project, sorted by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateOverview {
    /// States in id order (stable for equal ids)
    pub states: Vec<StateDefinition>,
    /// State class files that could not be parsed
    pub skipped_files: Vec<String>,
}

impl StateOverview {
    /// Parse both formats.
    ///
    /// Fails with [`LintError::NoStateDefinitions`] when nothing is found.
    pub fn from_sources(sources: &ProjectSources) -> LintResult<Self> {
        let (mut states, notes) = parse_sources(sources);
        if states.is_empty() {
            return Err(LintError::no_state_definitions(&sources.state_source_labels()));
        }
        states.sort_by_key(|s| s.id);
        Ok(Self {
            states,
            skipped_files: notes.into_iter().map(|d| d.location).collect(),
        })
    }

    /// Render as text
    #[must_use]
    pub fn render(&self, project_label: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("STATE MACHINE: {project_label}\n"));
        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

        for state in &self.states {
            output.push_str(&format!(
                "[{}] {} ({})\n    source: {}\n",
                state.id, state.name, state.kind, state.source_location
            ));
            if let Some(description) = &state.description {
                output.push_str(&format!("    description: {description}\n"));
            }
            if let Some(callback) = &state.legacy_callback {
                output.push_str(&format!("    action: {callback}\n"));
            }
            if state.transitions.is_empty() {
                output.push_str("    transitions: (none)\n");
            } else {
                output.push_str("    transitions:\n");
                for (label, target) in &state.transitions {
                    let label = if label.is_empty() { "(default)" } else { label };
                    output.push_str(&format!("      {label} -> {target}\n"));
                }
            }
            if !state.declared_actions.is_empty() {
                output.push_str(&format!(
                    "    actions: {}\n",
                    state.declared_actions.join(", ")
                ));
            }
            output.push('\n');
        }

        for file in &self.skipped_files {
            output.push_str(&format!("ℹ Skipped {file}: not a recognisable State class\n"));
        }
        output.push_str(&format!("{} state(s)\n", self.states.len()));
        output
    }

    /// Render as JSON
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
