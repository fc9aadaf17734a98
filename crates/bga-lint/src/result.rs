//! Result and error types for bga-lint.

use thiserror::Error;

/// Result type for linter operations
pub type LintResult<T> = Result<T, LintError>;

/// Errors that can occur while linting a project
///
/// Individual model defects are never errors; they are reported as
/// [`Diagnostic`](crate::Diagnostic)s. An error here means the analysis could
/// not produce a meaningful result at all.
#[derive(Debug, Error)]
pub enum LintError {
    /// Neither the legacy state file nor any state class yielded a state
    #[error("No state definitions found (checked: {checked}). Is this a valid BGA project directory?")]
    NoStateDefinitions {
        /// Human-readable list of the sources that were inspected
        checked: String,
    },

    /// Invalid linter configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Configuration file is not valid YAML
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// IO error while loading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LintError {
    /// Create a "no state definitions" error listing what was checked
    #[must_use]
    pub fn no_state_definitions(checked: &[&str]) -> Self {
        let checked = if checked.is_empty() {
            "nothing".to_string()
        } else {
            checked.join(", ")
        };
        Self::NoStateDefinitions { checked }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_state_definitions_lists_sources() {
        let err = LintError::no_state_definitions(&["states.inc.php", "modules/php/States/"]);
        let msg = err.to_string();
        assert!(msg.contains("No state definitions"));
        assert!(msg.contains("states.inc.php, modules/php/States/"));
    }

    #[test]
    fn test_no_state_definitions_empty() {
        let err = LintError::no_state_definitions(&[]);
        assert!(err.to_string().contains("checked: nothing"));
    }

    #[test]
    fn test_config_error() {
        let err = LintError::config("reserved ids must differ");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("reserved ids must differ"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LintError = io_err.into();
        assert!(err.to_string().contains("I/O"));
    }
}
