//! Diagnostics
//!
//! Warning/error classification of engine diagnostics and their text
//! rendering.

pub mod classify;
pub mod format;

pub use classify::{
    category_of, warning_categories, DiagnosticCounts, Severity, WarningCategory, WarningPolicy,
    UNRESOLVED_IMPORT, WARNINGS_AS_ERRORS,
};
pub use format::{format_diagnostics, format_summary};
pub use ts::{Diagnostic, DiagnosticCategory};
