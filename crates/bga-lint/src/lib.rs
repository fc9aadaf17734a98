//! bga-lint: static analysis for BGA game state machines
//!
//! A game's turn structure is declared either in the legacy `states.inc.php`
//! array or as one `class X extends GameState` per file under
//! `modules/php/States/`. This crate parses both into one model and checks it
//! for structural defects, then cross-references actions and notifications
//! against the front-end script.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────┐
//! │ ProjectSources│───►│ parse        │───►│ CheckBattery │───►│ report   │
//! │ (text + role) │    │ legacy/modern│    │ 11 checks    │    │ text/json│
//! └───────────────┘    └──────────────┘    └──────────────┘    └──────────┘
//! ```
//!
//! The crate never touches the filesystem except to load a configuration
//! file; callers decide which file plays which role.
//!
//! # Example
//!
//! ```
//! use bga_lint::{LinterConfig, ProjectSources, StateModelLinter};
//!
//! let sources = ProjectSources::new().with_legacy_states(
//!     "states.inc.php",
//!     "[\n  1 => [ \"name\" => \"gameSetup\", \"transitions\" => [\"\" => 99] ],\n];",
//! );
//! let outcome = StateModelLinter::new(LinterConfig::default())
//!     .lint(&sources)
//!     .unwrap();
//! assert!(outcome.passed());
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod checks;
mod config;
mod diagnostic;
mod linter;
pub mod migration;
mod model;
pub mod overview;
pub mod parse;
pub mod report;
mod result;
pub mod scan;
mod sources;

pub use checks::{codes, CheckBattery};
pub use config::LinterConfig;
pub use diagnostic::{Diagnostic, Severity};
pub use linter::{LintOutcome, StateModelLinter};
pub use migration::{scan_migration, MigrationReport, MigrationStatus};
pub use model::{action_method_name, normalize_action, SourceKind, StateDefinition, StateKind};
pub use overview::StateOverview;
pub use report::{render_report, render_report_json};
pub use result::{LintError, LintResult};
pub use scan::{list_player_actions, PlayerAction};
pub use sources::{ProjectSources, SourceFile, UnreadableFile};
