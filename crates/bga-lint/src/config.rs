//! Linter configuration

use crate::result::{LintError, LintResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration passed explicitly to the linter
///
/// Every field has a default matching the BGA framework conventions, so a
/// configuration file only needs to list what it overrides:
///
/// ```yaml
/// terminal_state_id: 98
/// disabled_checks: [NOTIF002]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinterConfig {
    /// Reserved setup state id, always considered declared
    pub initial_state_id: u32,
    /// Reserved end state id, always considered declared
    pub terminal_state_id: u32,
    /// Expected legacy name of the setup state
    pub setup_state_name: String,
    /// Accepted legacy names of the end state
    pub end_state_names: Vec<String>,
    /// Notifications the framework handles itself
    pub builtin_notifications: Vec<String>,
    /// Rule codes whose diagnostics are dropped
    pub disabled_checks: Vec<String>,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            initial_state_id: 1,
            terminal_state_id: 99,
            setup_state_name: "gameSetup".to_string(),
            end_state_names: vec!["gameEnd".to_string(), "GameEnd".to_string()],
            builtin_notifications: vec!["message".to_string(), "tableWindow".to_string()],
            disabled_checks: Vec::new(),
        }
    }
}

impl LinterConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reserved id pair
    #[must_use]
    pub const fn with_reserved_ids(mut self, initial: u32, terminal: u32) -> Self {
        self.initial_state_id = initial;
        self.terminal_state_id = terminal;
        self
    }

    /// Disable a rule by code
    #[must_use]
    pub fn with_disabled_check(mut self, code: impl Into<String>) -> Self {
        self.disabled_checks.push(code.into());
        self
    }

    /// The two reserved ids
    #[must_use]
    pub const fn reserved_ids(&self) -> [u32; 2] {
        [self.initial_state_id, self.terminal_state_id]
    }

    /// Whether `id` is one of the reserved ids
    #[must_use]
    pub const fn is_reserved(&self, id: u32) -> bool {
        id == self.initial_state_id || id == self.terminal_state_id
    }

    /// Whether diagnostics with this code should be reported
    #[must_use]
    pub fn is_enabled(&self, code: &str) -> bool {
        !self.disabled_checks.iter().any(|c| c.eq_ignore_ascii_case(code))
    }

    /// Whether a notification is handled by the framework
    #[must_use]
    pub fn is_builtin_notification(&self, name: &str) -> bool {
        self.builtin_notifications.iter().any(|n| n == name)
    }

    /// Parse configuration from YAML text and validate it
    pub fn from_yaml(text: &str) -> LintResult<Self> {
        // An empty document means "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> LintResult<Self> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded linter configuration");
        Self::from_yaml(&text)
    }

    /// Reject configurations the checks cannot work with
    pub fn validate(&self) -> LintResult<()> {
        if self.initial_state_id == self.terminal_state_id {
            return Err(LintError::config(format!(
                "initial_state_id and terminal_state_id must differ (both are {})",
                self.initial_state_id
            )));
        }
        if self.setup_state_name.is_empty() {
            return Err(LintError::config("setup_state_name must not be empty"));
        }
        if self.end_state_names.is_empty() {
            return Err(LintError::config(
                "end_state_names must list at least one name",
            ));
        }
        Ok(())
    }
}
