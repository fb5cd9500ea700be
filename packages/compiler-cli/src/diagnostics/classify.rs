// Diagnostic Classification
//
// Maps diagnostics onto named warning categories and decides, per the
// `--warn` policy, whether each one counts as a warning or an error.

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use ts::{Diagnostic, DiagnosticCategory};

/// Code of the diagnostic raised for an unresolved relative import under
/// `--strict-imports`.
pub const UNRESOLVED_IMPORT: i32 = 2307;

/// The `--warn` name that elevates every warning to an error.
pub const WARNINGS_AS_ERRORS: &str = "error";

enum Matcher {
    Codes(RangeInclusive<i32>),
    Message(Regex),
}

/// A named family of diagnostics that `--warn NAME` demotes to warnings.
pub struct WarningCategory {
    pub name: &'static str,
    pub description: &'static str,
    matcher: Matcher,
}

impl WarningCategory {
    pub fn matches(&self, diagnostic: &Diagnostic) -> bool {
        match &self.matcher {
            Matcher::Codes(codes) => codes.contains(&diagnostic.code),
            Matcher::Message(pattern) => pattern.is_match(&diagnostic.message),
        }
    }
}

static WARNING_CATEGORIES: Lazy<Vec<WarningCategory>> = Lazy::new(|| {
    vec![
        WarningCategory {
            name: "unused",
            description: "unused bindings, from engines that report them (oxc does not)",
            matcher: Matcher::Message(
                Regex::new(r"(?i)\b(is declared but (its value is )?never (read|used)|unused)\b")
                    .unwrap(),
            ),
        },
        WarningCategory {
            name: "declarations",
            description: "declarations that cannot be generated in isolation",
            matcher: Matcher::Codes(9000..=9999),
        },
        WarningCategory {
            name: "unresolved-import",
            description: "relative imports that resolve to nothing known",
            matcher: Matcher::Codes(UNRESOLVED_IMPORT..=UNRESOLVED_IMPORT),
        },
    ]
});

pub fn warning_categories() -> &'static [WarningCategory] {
    &WARNING_CATEGORIES
}

/// The first category the diagnostic belongs to, if any.
pub fn category_of(diagnostic: &Diagnostic) -> Option<&'static WarningCategory> {
    warning_categories().iter().find(|c| c.matches(diagnostic))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Which categories are demoted and whether warnings are elevated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningPolicy {
    demoted: BTreeSet<&'static str>,
    warnings_as_errors: bool,
}

impl WarningPolicy {
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        let mut policy = WarningPolicy::default();
        for name in names {
            let name = name.as_ref();
            if name == WARNINGS_AS_ERRORS {
                policy.warnings_as_errors = true;
                continue;
            }
            let category = warning_categories()
                .iter()
                .find(|c| c.name == name)
                .ok_or_else(|| ConfigError::UnknownWarning(name.to_string()))?;
            policy.demoted.insert(category.name);
        }
        Ok(policy)
    }

    pub fn warnings_as_errors(&self) -> bool {
        self.warnings_as_errors
    }

    /// `None` for diagnostics that are informational and never counted.
    pub fn classify(&self, diagnostic: &Diagnostic) -> Option<Severity> {
        let severity = match diagnostic.category {
            DiagnosticCategory::Message => return None,
            DiagnosticCategory::Error => match category_of(diagnostic) {
                Some(category) if self.demoted.contains(category.name) => Severity::Warning,
                _ => Severity::Error,
            },
            DiagnosticCategory::Warning | DiagnosticCategory::Suggestion => Severity::Warning,
        };
        if severity == Severity::Warning && self.warnings_as_errors {
            return Some(Severity::Error);
        }
        Some(severity)
    }

    pub fn count(&self, diagnostics: &[Diagnostic]) -> DiagnosticCounts {
        let mut counts = DiagnosticCounts::default();
        for diagnostic in diagnostics {
            match self.classify(diagnostic) {
                Some(Severity::Warning) => counts.warnings += 1,
                Some(Severity::Error) => counts.errors += 1,
                None => {}
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    pub warnings: usize,
    pub errors: usize,
}

impl DiagnosticCounts {
    pub fn is_empty(&self) -> bool {
        self.warnings == 0 && self.errors == 0
    }
}
