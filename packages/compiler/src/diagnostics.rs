// Engine Diagnostics
//
// Conversion of oxc diagnostics into `ts::Diagnostic`.

use oxc_diagnostics::OxcDiagnostic;
use std::path::Path;
use ts::Diagnostic;

/// Syntax errors reported by the parser.
pub const PARSE_ERROR: i32 = 1005;
/// Errors reported by semantic analysis.
pub const SEMANTIC_ERROR: i32 = 1100;
/// Errors reported while lowering TypeScript to JavaScript.
pub const TRANSFORM_ERROR: i32 = 1200;
/// Errors reported while generating declarations.
pub const DECLARATION_ERROR: i32 = 9005;

/// Convert one oxc diagnostic raised on `file`, whose contents are `text`.
pub fn to_diagnostic(error: &OxcDiagnostic, code: i32, file: &Path, text: &str) -> Diagnostic {
    let diagnostic = Diagnostic::error(code, error.message.to_string()).with_file(file);
    match error.labels.as_ref().and_then(|labels| labels.first()) {
        Some(label) => diagnostic.with_span_in(text, label.offset(), label.len()),
        None => diagnostic,
    }
}

pub fn to_diagnostics(
    errors: &[OxcDiagnostic],
    code: i32,
    file: &Path,
    text: &str,
) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|error| to_diagnostic(error, code, file, text))
        .collect()
}
