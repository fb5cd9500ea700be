#![deny(clippy::all)]

//! tsmerge Compiler - emission engine
//!
//! The type-checking and emission engine the build orchestrator drives one
//! file at a time. Parsing, type stripping, declaration generation and code
//! generation are delegated to the oxc toolchain.

pub mod diagnostics;
pub mod engine;
pub mod program;

pub use engine::{CompilerEngine, EngineError, PreEmitTransform, WriteFileCallback};
pub use program::OxcProgram;
