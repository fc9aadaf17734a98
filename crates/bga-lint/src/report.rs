//! Report formatting

use crate::diagnostic::{Diagnostic, Severity};
use crate::linter::LintOutcome;
use serde::Serialize;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// One-line status summary
#[must_use]
pub fn status_line(outcome: &LintOutcome) -> String {
    let errors = outcome.error_count();
    let warnings = outcome.warning_count();
    if errors > 0 {
        format!(
            "{} Status: {errors} error(s), fix these before submitting",
            Severity::Error.symbol()
        )
    } else if warnings > 0 {
        format!(
            "{} Status: {warnings} warning(s), review recommended",
            Severity::Warning.symbol()
        )
    } else {
        "✓ Status: All checks passed".to_string()
    }
}

fn scanned_sources(outcome: &LintOutcome) -> String {
    let mut parts = Vec::new();
    if let Some(legacy) = &outcome.legacy_source {
        parts.push(legacy.clone());
    }
    if outcome.modern_state_files > 0 {
        parts.push(format!("{} state class file(s)", outcome.modern_state_files));
    }
    parts.join(" + ")
}

/// Render lint report as text
#[must_use]
pub fn render_report(outcome: &LintOutcome, project_label: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("VALIDATION REPORT: {project_label}\n"));
    output.push_str(RULE);
    output.push_str("\n\n");
    output.push_str(&status_line(outcome));
    output.push_str("\n\n");
    output.push_str(&format!(
        "Scanned {} state definition(s) across {}\n\n",
        outcome.state_count,
        scanned_sources(outcome)
    ));

    for severity in Severity::ALL {
        let items: Vec<&Diagnostic> = outcome.with_severity(severity).collect();
        if items.is_empty() {
            continue;
        }
        output.push_str(&format!("{} ({}):\n", severity.heading(), items.len()));
        for d in items {
            output.push_str(&format!(
                "  {} [{}] {}\n      {}\n",
                severity.symbol(),
                d.code,
                d.location,
                d.message
            ));
            if let Some(hint) = &d.hint {
                output.push_str(&format!("      Suggestion: {hint}\n"));
            }
        }
        output.push('\n');
    }

    output.push_str(RULE);
    output.push('\n');
    output.push_str(&format!(
        "Summary: {} errors, {} warnings, {} infos, {} states checked\n",
        outcome.error_count(),
        outcome.warning_count(),
        outcome.info_count(),
        outcome.state_count
    ));

    output
}

#[derive(Serialize)]
struct JsonReport<'a> {
    project: &'a str,
    passed: bool,
    state_count: usize,
    legacy_source: Option<&'a str>,
    modern_state_files: usize,
    errors: usize,
    warnings: usize,
    infos: usize,
    diagnostics: Vec<&'a Diagnostic>,
}

/// Render lint report as JSON, diagnostics grouped by severity
pub fn render_report_json(
    outcome: &LintOutcome,
    project_label: &str,
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        project: project_label,
        passed: outcome.passed(),
        state_count: outcome.state_count,
        legacy_source: outcome.legacy_source.as_deref(),
        modern_state_files: outcome.modern_state_files,
        errors: outcome.error_count(),
        warnings: outcome.warning_count(),
        infos: outcome.info_count(),
        diagnostics: Severity::ALL
            .iter()
            .flat_map(|s| outcome.with_severity(*s))
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn outcome(diagnostics: Vec<Diagnostic>) -> LintOutcome {
        LintOutcome {
            diagnostics,
            state_count: 4,
            legacy_source: Some("states.inc.php".to_string()),
            modern_state_files: 2,
        }
    }

    #[test]
    fn test_status_all_clear() {
        let text = render_report(&outcome(vec![]), "mygame");
        assert!(text.contains("VALIDATION REPORT: mygame"));
        assert!(text.contains("All checks passed"));
        assert!(text.contains("Scanned 4 state definition(s) across states.inc.php + 2 state class file(s)"));
        assert!(!text.contains("Errors ("));
    }

    #[test]
    fn test_status_prefers_errors() {
        let o = outcome(vec![
            Diagnostic::warning("a.php", "STATE003", "w"),
            Diagnostic::error("b.php", "STATE002", "e"),
        ]);
        assert!(status_line(&o).contains("1 error(s)"));

        let o = outcome(vec![Diagnostic::warning("a.php", "STATE003", "w")]);
        assert!(status_line(&o).contains("1 warning(s)"));
    }

    #[test]
    fn test_sections_ordered_by_severity() {
        let o = outcome(vec![
            Diagnostic::info("c.js", "NOTIF002", "third"),
            Diagnostic::warning("b.php", "STATE003", "second"),
            Diagnostic::error("a.php", "STATE002", "first").with_hint("fix it"),
        ]);
        let text = render_report(&o, "g");
        let errors = text.find("Errors (1):").unwrap();
        let warnings = text.find("Warnings (1):").unwrap();
        let infos = text.find("Info / Suggestions (1):").unwrap();
        assert!(errors < warnings && warnings < infos);
        assert!(text.contains("Suggestion: fix it"));
        assert!(text.contains("Summary: 1 errors, 1 warnings, 1 infos, 4 states checked"));
    }

    #[test]
    fn test_json_report() {
        let o = outcome(vec![
            Diagnostic::info("c.js", "NOTIF002", "later"),
            Diagnostic::error("a.php", "STATE002", "first"),
        ]);
        let json = render_report_json(&o, "g").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["project"], "g");
        assert_eq!(value["passed"], false);
        assert_eq!(value["errors"], 1);
        assert_eq!(value["diagnostics"][0]["code"], "STATE002");
        assert_eq!(value["diagnostics"][0]["severity"], "error");
        assert_eq!(value["diagnostics"][1]["code"], "NOTIF002");
    }
}
