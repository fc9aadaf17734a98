//! Caller-supplied project sources
//!
//! The linter never touches the filesystem. Whoever drives it decides which
//! file plays which role and hands over the raw text with a relative-path
//! label.

use serde::{Deserialize, Serialize};

/// Raw text of one file plus the label used in diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Relative path label, e.g. `modules/php/States/PlayerTurn.php`
    pub path: String,
    /// Full file contents
    pub text: String,
}

impl SourceFile {
    /// Create a new source file
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// File name without directories
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path.rsplit(['/', '\\']).next().unwrap_or(&self.path)
    }
}

/// Every input of one analysis, keyed by role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSources {
    /// Legacy `states.inc.php`
    pub legacy_states: Option<SourceFile>,
    /// Modern state class files
    pub state_classes: Vec<SourceFile>,
    /// Label of the state class directory, when it exists (even if empty)
    pub state_class_dir: Option<String>,
    /// Front-end client script
    pub front_end: Option<SourceFile>,
    /// Main server logic file (`Game.php` or `<game>.game.php`)
    pub main_logic: Option<SourceFile>,
    /// Other server scripts scanned for notification sends
    pub server_scripts: Vec<SourceFile>,
    /// Files the caller found but could not read
    #[serde(default)]
    pub unreadable: Vec<UnreadableFile>,
}

/// A file that was meant to be analysed but could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadableFile {
    /// Relative path label
    pub path: String,
    /// Why reading failed
    pub reason: String,
}

impl ProjectSources {
    /// Create an empty source set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the legacy state file
    #[must_use]
    pub fn with_legacy_states(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.legacy_states = Some(SourceFile::new(path, text));
        self
    }

    /// Add a state class file
    #[must_use]
    pub fn with_state_class(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.state_classes.push(SourceFile::new(path, text));
        self
    }

    /// Mark the state class directory as present
    #[must_use]
    pub fn with_state_class_dir(mut self, label: impl Into<String>) -> Self {
        self.state_class_dir = Some(label.into());
        self
    }

    /// Set the front-end script
    #[must_use]
    pub fn with_front_end(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.front_end = Some(SourceFile::new(path, text));
        self
    }

    /// Set the main logic file
    #[must_use]
    pub fn with_main_logic(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.main_logic = Some(SourceFile::new(path, text));
        self
    }

    /// Add another server script
    #[must_use]
    pub fn with_server_script(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.server_scripts.push(SourceFile::new(path, text));
        self
    }

    /// Record a file that could not be read
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<String>, reason: impl Into<String>) -> Self {
        self.unreadable.push(UnreadableFile {
            path: path.into(),
            reason: reason.into(),
        });
        self
    }

    /// Every server-side file: legacy states, main logic, other scripts, state classes
    pub fn server_files(&self) -> impl Iterator<Item = &SourceFile> {
        self.legacy_states
            .iter()
            .chain(self.main_logic.iter())
            .chain(self.server_scripts.iter())
            .chain(self.state_classes.iter())
    }

    /// Find a state class file by its label
    #[must_use]
    pub fn state_class(&self, path: &str) -> Option<&SourceFile> {
        self.state_classes.iter().find(|f| f.path == path)
    }

    /// Labels of the state sources that exist, for messages
    #[must_use]
    pub fn state_source_labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        if let Some(legacy) = &self.legacy_states {
            labels.push(legacy.path.as_str());
        }
        if let Some(dir) = &self.state_class_dir {
            labels.push(dir.as_str());
        } else if let Some(first) = self.state_classes.first() {
            labels.push(first.path.as_str());
        }
        labels
    }
}
