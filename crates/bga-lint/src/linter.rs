//! State model linter
//!
//! Parses every supplied source into the unified model, then runs the check
//! battery over it.
//!
//! ## Rules
//!
//! | Rule | Description | Severity |
//! |------|-------------|----------|
//! | IO001 | Source file could not be read | Error |
//! | STATE000 | State class file could not be parsed | Info |
//! | STATE001 | Duplicate state id | Error |
//! | STATE002 | Transition points to an undeclared id | Error |
//! | STATE003 | State is never a transition target | Warning |
//! | STATE004 | Player state class without `zombie()` | Warning |
//! | STATE005 | File name differs from class name | Error |
//! | STATE006 | Reserved id with unconventional name | Warning |
//! | ACTION001 | Front end calls an unknown action | Error |
//! | ACTION002 | Back-end action never called | Info |
//! | NOTIF001 | Notification sent with no handler | Warning |
//! | NOTIF002 | Handler for a notification nobody sends | Info |
//! | GAME001 | `getGameProgression()` always returns 0 | Info |
//! | STATE010 | `#[PossibleAction]` without its import | Error |
//! | STATE011 | Declared action with no method | Error |

use crate::checks::{codes, CheckBattery};
use crate::config::LinterConfig;
use crate::diagnostic::{Diagnostic, Severity};
use crate::parse::parse_sources;
use crate::result::{LintError, LintResult};
use crate::sources::ProjectSources;
use serde::{Deserialize, Serialize};

/// Result of linting one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintOutcome {
    /// Findings in discovery order
    pub diagnostics: Vec<Diagnostic>,
    /// Number of state definitions recovered
    pub state_count: usize,
    /// Label of the legacy state file, when supplied
    pub legacy_source: Option<String>,
    /// Number of state class files supplied
    pub modern_state_files: usize,
}

impl LintOutcome {
    /// Diagnostics of one severity, in discovery order
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    /// Error diagnostics
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    /// Warning diagnostics
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    /// Info diagnostics
    pub fn infos(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Info)
    }

    /// Count errors
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count warnings
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Count infos
    #[must_use]
    pub fn info_count(&self) -> usize {
        self.infos().count()
    }

    /// No errors and no warnings
    #[must_use]
    pub fn passed(&self) -> bool {
        self.error_count() == 0 && self.warning_count() == 0
    }
}

/// Linter for a BGA game state machine
#[derive(Debug, Clone, Default)]
pub struct StateModelLinter {
    config: LinterConfig,
}

impl StateModelLinter {
    /// Create a linter with the given configuration
    #[must_use]
    pub const fn new(config: LinterConfig) -> Self {
        Self { config }
    }


    /// Lint one project.
    ///
    /// Fails with [`LintError::NoStateDefinitions`] when neither source
    /// format yields a single state; every other problem is a diagnostic.
    pub fn lint(&self, sources: &ProjectSources) -> LintResult<LintOutcome> {
        let (states, notes) = parse_sources(sources);
        if states.is_empty() {
            return Err(LintError::no_state_definitions(&sources.state_source_labels()));
        }

        let mut diagnostics: Vec<Diagnostic> = sources
            .unreadable
            .iter()
            .map(|file| {
                Diagnostic::error(
                    &file.path,
                    codes::UNREADABLE_FILE,
                    format!("Could not read `{}`: {}", file.path, file.reason),
                )
                .with_hint("The file was skipped, so checks that depend on it are incomplete.")
            })
            .collect();
        diagnostics.extend(notes);
        diagnostics.extend(CheckBattery::new(&states, sources, &self.config).run());
        let total = diagnostics.len();
        diagnostics.retain(|d| self.config.is_enabled(&d.code));
        tracing::debug!(
            states = states.len(),
            diagnostics = diagnostics.len(),
            suppressed = total - diagnostics.len(),
            "lint finished"
        );

        Ok(LintOutcome {
            diagnostics,
            state_count: states.len(),
            legacy_source: sources.legacy_states.as_ref().map(|f| f.path.clone()),
            modern_state_files: sources.state_classes.len(),
        })
    }
}
