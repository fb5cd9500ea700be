// Diagnostic Formatting
//
// Plain-text rendering of diagnostics and the closing summary line.

use super::classify::DiagnosticCounts;
use ts::Diagnostic;

/// Format diagnostics for display, one per line.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();
    for diag in diagnostics {
        output.push_str(&diag.to_string());
        output.push('\n');
    }
    output
}

/// The summary line, or `None` when nothing was counted.
pub fn format_summary(counts: &DiagnosticCounts) -> Option<String> {
    if counts.is_empty() {
        return None;
    }
    Some(format!(
        "Found {} error(s) and {} warning(s).",
        counts.errors, counts.warnings
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_diagnostics() {
        let diagnostics = vec![
            Diagnostic::error(1005, "';' expected.").with_file("/a.ts"),
            Diagnostic::warning(2307, "Cannot resolve './b'"),
        ];
        assert_eq!(
            format_diagnostics(&diagnostics),
            "/a.ts: error TS1005: ';' expected.\nwarning TS2307: Cannot resolve './b'\n"
        );
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(format_summary(&DiagnosticCounts::default()), None);
        assert_eq!(
            format_summary(&DiagnosticCounts {
                warnings: 2,
                errors: 1
            })
            .as_deref(),
            Some("Found 1 error(s) and 2 warning(s).")
        );
    }
}
