//! TypeScript-compatible interfaces and types shared by the tsmerge packages.
//! This crate serves as a shared compatibility layer between the emission
//! engine and the build orchestrator.

use std::fmt;
use std::path::PathBuf;

pub mod extension;
pub mod program;

pub use extension::*;
pub use program::*;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

impl DiagnosticCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

// --- Diagnostic Structures ---

/// A diagnostic produced by the engine or by the orchestrator itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: i32,
    pub message: String,
    pub file: Option<PathBuf>,
    pub start: Option<usize>,
    pub length: Option<usize>,
    /// 1-based line and column of `start`.
    pub location: Option<(usize, usize)>,
}

impl Diagnostic {
    pub fn new(category: DiagnosticCategory, code: i32, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
            file: None,
            start: None,
            length: None,
            location: None,
        }
    }

    pub fn error(code: i32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Error, code, message)
    }

    pub fn warning(code: i32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Warning, code, message)
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_span(mut self, start: usize, length: usize) -> Self {
        self.start = Some(start);
        self.length = Some(length);
        self
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some((line, column));
        self
    }

    /// Record the span and resolve its start to a line and column of `text`.
    pub fn with_span_in(self, text: &str, start: usize, length: usize) -> Self {
        let (line, column) = line_and_column(text, start);
        self.with_span(start, length).with_location(line, column)
    }
}

/// 1-based line and column (in characters) of a byte offset.
///
/// Offsets past the end, or inside a multi-byte character, are clamped back
/// to the nearest character boundary.
pub fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = &text[..end];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = before.matches('\n').count() + 1;
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.location) {
            (Some(file), Some((line, column))) => {
                write!(f, "{}({},{}): ", file.display(), line, column)?
            }
            (Some(file), None) => write!(f, "{}: ", file.display())?,
            _ => {}
        }
        write!(
            f,
            "{} TS{}: {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}
