//! Compile
//!
//! Planning and emission of one compilation unit: input resolution with
//! collision detection, directory materialization, and the per-file emission
//! loop.

pub mod context;
pub mod directories;
pub mod emitter;
pub mod input_resolver;

pub use context::{CompilationContext, CompilationFile, InputRoot, InputRootKind, OutputDirectory};
pub use directories::{materialize_directories, minimal_directory_set};
pub use emitter::{emit_files, EmitFlags, EmitSummary};
pub use input_resolver::resolve_inputs;
