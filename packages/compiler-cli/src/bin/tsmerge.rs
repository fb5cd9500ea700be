/**
 * tsmerge
 *
 * Compile independent source roots into one output tree.
 */
use anyhow::Result;
use clap::Parser;
use std::process;
use tsmerge_cli::config::CommandLineArgs;
use tsmerge_cli::error::ConfigError;
use tsmerge_cli::file_system::NodeJSFileSystem;
use tsmerge_cli::logging::ConsoleLogger;
use tsmerge_cli::main_entry::main_fn;

fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    ConsoleLogger::init(ConsoleLogger::level_for(args.verbose))?;

    let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    let fs = NodeJSFileSystem::new();
    let code = main_fn(&args, &cwd, &fs, |msg| eprintln!("{}", msg));
    process::exit(code);
}
