// Main Entry Point
//
// Runs one invocation from parsed command line arguments and reports through
// a caller-supplied error sink.

use crate::config::{read_configuration, CommandLineArgs};
use crate::diagnostics::{format_diagnostics, format_summary};
use crate::file_system::FileSystem;
use crate::perform_compile::{exit_code_from_result, perform_compilation};
use std::path::Path;

/// Main entry point for the build orchestrator.
///
/// Prints diagnostics and the summary line through `console_error`.
/// Returns 0 on success, 1 when an error was counted or a fatal error occurred.
pub fn main_fn<F>(args: &CommandLineArgs, cwd: &Path, fs: &dyn FileSystem, console_error: F) -> i32
where
    F: Fn(&str),
{
    let config = match read_configuration(args, cwd) {
        Ok(config) => config,
        Err(e) => {
            console_error(&format!("error: {}", e));
            return 1;
        }
    };

    match perform_compilation(&config, fs) {
        Ok(result) => {
            let text = format_diagnostics(&result.diagnostics);
            if !text.is_empty() {
                console_error(text.trim_end());
            }
            if let Some(summary) = format_summary(&result.counts) {
                console_error(&summary);
            }
            exit_code_from_result(&result)
        }
        Err(e) => {
            console_error(&format!("error: {}", e));
            1
        }
    }
}
