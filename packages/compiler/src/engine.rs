//! Engine API
//!
//! The contract between the build orchestrator and the emission engine: a
//! whole-program diagnostics pass, and single-file emission with an ordered
//! list of pre-emit tree transforms.

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use ts::Diagnostic;

/// Receives every file the engine emits, as `(output_file_path, text)`.
///
/// Output paths are addressed next to the source file; callers relocate them
/// by suffix.
pub type WriteFileCallback<'w> = dyn FnMut(&Path, &str) -> io::Result<()> + 'w;

/// A rewrite applied to a freshly parsed source tree before anything is
/// generated from it.
pub trait PreEmitTransform {
    fn transform<'a>(
        &mut self,
        allocator: &'a Allocator,
        program: &mut Program<'a>,
        source_path: &Path,
    );
}

/// Errors raised by the engine while emitting.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} is not part of the program")]
    UnknownSourceFile(PathBuf),
    #[error("{0} is a declaration file and is never emitted")]
    DeclarationFile(PathBuf),
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to lower {path}: {message}")]
    Transform { path: PathBuf, message: String },
}

/// The type-checking and emission engine.
pub trait CompilerEngine {
    /// Whole-program diagnostics gathered before any emission.
    fn pre_emit_diagnostics(&self) -> Vec<Diagnostic>;

    /// Emit a single source file, running `transforms` in order on its tree.
    fn emit_file(
        &self,
        file: &Path,
        write_file: &mut WriteFileCallback<'_>,
        transforms: &mut [&mut dyn PreEmitTransform],
    ) -> Result<(), EngineError>;
}
