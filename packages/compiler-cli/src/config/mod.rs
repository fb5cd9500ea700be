//! Configuration
//!
//! Command line surface and its normalization into a `ParsedConfiguration`.

pub mod path_map;

pub use path_map::{PathMapEntry, PathMapTable};

use crate::diagnostics::WarningPolicy;
use crate::error::ConfigError;
use crate::util::absolute_from;
use clap::Parser;
use std::path::{Path, PathBuf};
use ts::CompilerOptions;

/// Compile independent source roots into one output tree.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tsmerge", version)]
pub struct CommandLineArgs {
    /// Output directory every input root is re-rooted under.
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Emit .d.ts declaration files.
    #[arg(short = 'd', long)]
    pub declaration: bool,

    /// Emit .d.ts.map files (requires --declaration).
    #[arg(long = "declaration-map")]
    pub declaration_map: bool,

    /// Emit .js.map source maps.
    #[arg(short = 'm', long = "source-map")]
    pub source_map: bool,

    /// Rewrite imports that leave the compiled set: FROM[:TO].
    #[arg(short = 'P', long = "path-map", value_name = "FROM[:TO]")]
    pub path_map: Vec<String>,

    /// Demote a warning category, or `error` to treat warnings as errors.
    #[arg(short = 'W', long = "warn", value_name = "NAME")]
    pub warn: Vec<String>,

    /// Report relative imports that cannot be resolved.
    #[arg(long = "strict-imports")]
    pub strict_imports: bool,

    /// Log planning and emission details.
    #[arg(short, long)]
    pub verbose: bool,

    /// Files or directories to compile.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}

/// Normalized configuration for one invocation.
#[derive(Debug, Clone, Default)]
pub struct ParsedConfiguration {
    /// Absolute, normalized input roots in command line order.
    pub root_names: Vec<PathBuf>,
    pub options: CompilerOptions,
    pub path_map: PathMapTable,
    pub warnings: WarningPolicy,
    pub strict_imports: bool,
}

/// Validate and normalize the command line, resolving paths against `cwd`.
pub fn read_configuration(
    args: &CommandLineArgs,
    cwd: &Path,
) -> Result<ParsedConfiguration, ConfigError> {
    let root_names: Vec<PathBuf> = args
        .inputs
        .iter()
        .map(|input| absolute_from(cwd, input))
        .collect();

    let out_dir = args.out_dir.as_ref().map(|dir| absolute_from(cwd, dir));
    if out_dir.is_none() && !root_names.is_empty() {
        return Err(ConfigError::MissingOutDir);
    }

    let options = CompilerOptions {
        out_dir,
        declaration: args.declaration,
        declaration_map: args.declaration_map,
        source_map: args.source_map,
    };

    Ok(ParsedConfiguration {
        root_names,
        options,
        path_map: PathMapTable::parse(args.path_map.as_slice(), cwd)?,
        warnings: WarningPolicy::from_names(args.warn.as_slice())?,
        strict_imports: args.strict_imports,
    })
}
