//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// No project could be selected
    #[error("{message}")]
    ProjectNotFound {
        /// Error message
        message: String,
    },

    /// The project has errors (or warnings under `--strict`)
    #[error("Validation failed: {errors} error(s), {warnings} warning(s)")]
    ValidationFailed {
        /// Error count
        errors: usize,
        /// Warning count
        warnings: usize,
    },

    /// Report generation error
    #[error("Report generation failed: {message}")]
    ReportGeneration {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Linter error
    #[error(transparent)]
    Lint(#[from] bga_lint::LintError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a project-not-found error
    #[must_use]
    pub fn project_not_found(message: impl Into<String>) -> Self {
        Self::ProjectNotFound {
            message: message.into(),
        }
    }

    /// Create a validation failure
    #[must_use]
    pub const fn validation_failed(errors: usize, warnings: usize) -> Self {
        Self::ValidationFailed { errors, warnings }
    }

    /// Create a report generation error
    #[must_use]
    pub fn report_generation(message: impl Into<String>) -> Self {
        Self::ReportGeneration {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::report_generation(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_project_not_found_error() {
        let err = CliError::project_not_found("pass --game");
        assert_eq!(err.to_string(), "pass --game");
    }

    #[test]
    fn test_validation_failed_error() {
        let err = CliError::validation_failed(2, 1);
        assert_eq!(err.to_string(), "Validation failed: 2 error(s), 1 warning(s)");
    }

    #[test]
    fn test_report_generation_error() {
        let err = CliError::report_generation("report failed");
        assert!(err.to_string().contains("Report"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_lint_error_is_transparent() {
        let cli_err: CliError = bga_lint::LintError::no_state_definitions(&["states.inc.php"]).into();
        assert!(cli_err.to_string().starts_with("No state definitions found"));
    }
}
