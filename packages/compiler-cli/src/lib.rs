#![deny(clippy::all)]

/**
 * tsmerge CLI
 *
 * Plans a multi-root compilation unit, rewrites relative imports for the
 * merged layout and drives the emission engine.
 */
pub use tsmerge_compiler as compiler;

pub mod compile;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod file_system;
pub mod imports;
pub mod logging;
pub mod main_entry;
pub mod perform_compile;
pub mod sourcemaps;
pub mod util;
