// Perform Compile
//
// One invocation end to end: plan the unit, gather pre-emit diagnostics,
// materialize directories, emit, and report.

use crate::compile::{emit_files, materialize_directories, resolve_inputs, CompilationContext};
use crate::config::ParsedConfiguration;
use crate::diagnostics::{DiagnosticCounts, UNRESOLVED_IMPORT};
use crate::error::{CompileError, ConfigError};
use crate::file_system::FileSystem;
use crate::imports::UnresolvedSpecifier;
use log::{debug, info};
use std::path::PathBuf;
use ts::Diagnostic;
use tsmerge_compiler::{CompilerEngine, OxcProgram};

/// Compilation result.
#[derive(Debug, Clone, Default)]
pub struct CompilationResult {
    /// Pre-emit diagnostics, then any raised during emission.
    pub diagnostics: Vec<Diagnostic>,
    pub counts: DiagnosticCounts,
    /// Every file written, in write order. Empty when errors aborted emission.
    pub written: Vec<PathBuf>,
}

impl CompilationResult {
    pub fn has_errors(&self) -> bool {
        self.counts.errors > 0
    }
}

/// Plan, check and emit the configured inputs with the oxc engine.
pub fn perform_compilation(
    config: &ParsedConfiguration,
    fs: &dyn FileSystem,
) -> Result<CompilationResult, CompileError> {
    if config.root_names.is_empty() {
        debug!("no inputs, nothing to do");
        return Ok(CompilationResult::default());
    }
    let out_dir = config
        .options
        .out_dir
        .as_deref()
        .ok_or(ConfigError::MissingOutDir)?;

    let context = resolve_inputs(&config.root_names, out_dir)?;
    info!("planned {} file(s) into {}", context.len(), out_dir.display());

    let program = OxcProgram::new(context.source_paths(), config.options.clone())?;
    compile_with_engine(&program, &context, config, fs)
}

/// Run the checked part of the pipeline against any engine.
///
/// Nothing is written when pre-emit diagnostics contain an error.
pub fn compile_with_engine(
    engine: &dyn CompilerEngine,
    context: &CompilationContext,
    config: &ParsedConfiguration,
    fs: &dyn FileSystem,
) -> Result<CompilationResult, CompileError> {
    let mut diagnostics = engine.pre_emit_diagnostics();
    let counts = config.warnings.count(&diagnostics);
    if counts.errors > 0 {
        info!("{} error(s) before emit, nothing written", counts.errors);
        return Ok(CompilationResult {
            diagnostics,
            counts,
            written: Vec::new(),
        });
    }

    materialize_directories(fs, context)?;
    let summary = emit_files(engine, context, &config.path_map, &config.options, fs)?;
    info!(
        "emitted {} file(s), wrote {} output(s)",
        summary.emitted_files,
        summary.written.len()
    );

    if config.strict_imports {
        diagnostics.extend(summary.unresolved.iter().map(unresolved_import_diagnostic));
    }

    Ok(CompilationResult {
        counts: config.warnings.count(&diagnostics),
        diagnostics,
        written: summary.written,
    })
}

fn unresolved_import_diagnostic(unresolved: &UnresolvedSpecifier) -> Diagnostic {
    Diagnostic::warning(
        UNRESOLVED_IMPORT,
        format!(
            "Cannot resolve relative import '{}' against the compiled files or path map.",
            unresolved.specifier
        ),
    )
    .with_file(unresolved.importer.clone())
    .with_span(unresolved.start, unresolved.length)
    .with_location(unresolved.location.0, unresolved.location.1)
}

/// Exit code: 1 when any error was counted, else 0.
pub fn exit_code_from_result(result: &CompilationResult) -> i32 {
    if result.has_errors() {
        1
    } else {
        0
    }
}
