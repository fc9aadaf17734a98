//! Status messages on stderr
//!
//! Reports and listings go to stdout so they can be piped. Everything the
//! user reads as progress or verdict goes through [`StatusReporter`].

use bga_lint::LintOutcome;
use console::{style, Term};

/// Writes styled status lines to stderr
#[derive(Debug)]
pub struct StatusReporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl StatusReporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    fn line(&self, symbol: &str, plain: &str, paint: fn(&str) -> String, message: &str) {
        let prefix = if self.use_color {
            paint(symbol)
        } else {
            plain.to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line("✓", "PASS", |s| style(s).green().bold().to_string(), message);
    }

    /// Print a failure message (shown even in quiet mode)
    pub fn failure(&self, message: &str) {
        self.line("✗", "FAIL", |s| style(s).red().bold().to_string(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line("⚠", "WARN", |s| style(s).yellow().bold().to_string(), message);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line("ℹ", "INFO", |s| style(s).blue().bold().to_string(), message);
    }

    /// Print the one-line verdict for a lint run
    pub fn verdict(&self, outcome: &LintOutcome, strict: bool) {
        let errors = outcome.error_count();
        let warnings = outcome.warning_count();
        if errors > 0 || (strict && warnings > 0) {
            self.failure(&verdict_message(outcome));
        } else if warnings > 0 {
            self.warning(&verdict_message(outcome));
        } else {
            self.success(&verdict_message(outcome));
        }
    }
}

/// Counts sentence used by [`StatusReporter::verdict`]
#[must_use]
pub fn verdict_message(outcome: &LintOutcome) -> String {
    format!(
        "{} state(s) checked: {} error(s), {} warning(s), {} info(s)",
        outcome.state_count,
        outcome.error_count(),
        outcome.warning_count(),
        outcome.info_count()
    )
}
