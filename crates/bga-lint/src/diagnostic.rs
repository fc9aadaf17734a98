//! Diagnostics produced by the check battery

use serde::{Deserialize, Serialize};

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - structurally broken
    Error,
    /// Warning - likely wrong, could be intentional
    Warning,
    /// Info - observation
    Info,
}

impl Severity {
    /// All severities in display order
    pub const ALL: [Self; 3] = [Self::Error, Self::Warning, Self::Info];

    /// Get symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Error => "✗",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }

    /// Section heading used by the report formatter
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Error => "Errors",
            Self::Warning => "Warnings",
            Self::Info => "Info / Suggestions",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Rule code (e.g. "STATE002")
    pub code: String,
    /// File path, or several joined with ", "
    pub location: String,
    /// Human-readable message
    pub message: String,
    /// Remediation suggestion
    pub hint: Option<String>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        location: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            location: location.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Create a new error
    pub fn error(
        location: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Error, location, code, message)
    }

    /// Create a new warning
    pub fn warning(
        location: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, location, code, message)
    }

    /// Create a new info
    pub fn info(
        location: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Info, location, code, message)
    }

    /// Set hint
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{}]: {} ({})",
            self.severity, self.code, self.message, self.location
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  = help: {hint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_symbol() {
        assert_eq!(Severity::Error.symbol(), "✗");
        assert_eq!(Severity::Warning.symbol(), "⚠");
        assert_eq!(Severity::Info.symbol(), "ℹ");
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }

    #[test]
    fn test_diagnostic_builder() {
        let diag = Diagnostic::error("states.inc.php", "STATE002", "Broken transition")
            .with_hint("Fix it");

        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.location, "states.inc.php");
        assert_eq!(diag.code, "STATE002");
        assert_eq!(diag.hint, Some("Fix it".to_string()));
    }

    #[test]
    fn test_display_includes_hint() {
        let diag = Diagnostic::warning("a.php", "STATE003", "Unreachable").with_hint("Delete it");
        let text = diag.to_string();
        assert!(text.starts_with("warning[STATE003]: Unreachable (a.php)"));
        assert!(text.contains("= help: Delete it"));
    }

    #[test]
    fn test_serialize_lowercase_severity() {
        let diag = Diagnostic::info("x.js", "NOTIF002", "Unused handler");
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"severity\":\"info\""));
    }
}
