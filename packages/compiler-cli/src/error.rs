//! Error types for the build orchestrator.
//!
//! Every variant is fatal: the pipeline stops at the first one and no output
//! is written once planning has failed.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tsmerge_compiler::EngineError;

/// Invalid command line or configuration, reported before any planning.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid path map '{0}': expected FROM[:TO]")]
    InvalidPathMap(String),
    #[error("unknown warning name '{0}'")]
    UnknownWarning(String),
    #[error("an output directory is required when input files are given")]
    MissingOutDir,
    #[error("cannot determine the current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

/// Conflicts discovered while resolving inputs, before any directory is
/// created or the engine is invoked.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("duplicate input file {path} (reached from {first_root} and {second_root})")]
    DuplicateInput {
        path: PathBuf,
        first_root: PathBuf,
        second_root: PathBuf,
    },
    #[error(
        "output collision in {output_dir}: {existing} and {incoming} both produce '{basename}'"
    )]
    BasenameCollision {
        output_dir: PathBuf,
        basename: String,
        existing: PathBuf,
        incoming: PathBuf,
    },
    #[error("input {0} does not exist")]
    MissingInput(PathBuf),
    #[error("invalid input pattern: {0}")]
    Pattern(String),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Any fatal condition raised by `perform_compilation`.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid source map emitted for {path}: {source}")]
    SourceMap {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
