// Directory Materializer
//
// Creates the output directories of a validated plan with as few creation
// calls as the nesting allows. Directory creation is recursive and
// idempotent, so a directory whose descendant is also created is skipped.

use super::context::CompilationContext;
use crate::error::CompileError;
use crate::file_system::FileSystem;
use crate::util::with_trailing_separator;
use log::debug;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Reduce `dirs` to the directories that are not an ancestor of another one.
///
/// Each path gets a trailing separator before sorting so that `out/ab` is not
/// taken for a descendant of `out/a`.
pub fn minimal_directory_set<'a, I>(dirs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut keys: Vec<String> = dirs.into_iter().map(with_trailing_separator).collect();
    keys.sort();
    keys.dedup();

    keys.iter()
        .enumerate()
        .filter(|(i, key)| match keys.get(i + 1) {
            Some(next) => !next.starts_with(key.as_str()),
            None => true,
        })
        .map(|(_, key)| PathBuf::from(key.as_str()).components().collect())
        .collect()
}

/// Create the output directory of every file that will be emitted.
pub fn materialize_directories(
    fs: &dyn FileSystem,
    context: &CompilationContext,
) -> Result<Vec<PathBuf>, CompileError> {
    let dirs = minimal_directory_set(
        context
            .files()
            .filter(|file| !file.is_declaration())
            .map(|file| file.output_dir.as_path()),
    );
    debug!("creating {} output director(ies)", dirs.len());

    dirs.par_iter().try_for_each(|dir| {
        fs.ensure_dir(dir).map_err(|source| CompileError::Io {
            path: dir.clone(),
            source,
        })
    })?;
    Ok(dirs)
}
