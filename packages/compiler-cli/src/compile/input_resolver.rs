// Input Resolver
//
// Expands each input root into compilation files and fills the compilation
// context. Reads the file system; never writes to it.

use super::context::{CompilationContext, CompilationFile, InputRoot, InputRootKind};
use crate::error::PlanError;
use crate::util::{normalize_path, relative_path};
use log::{debug, trace};
use std::io;
use std::path::{Component, Path, PathBuf};
use ts::has_source_extension;

const NODE_MODULES: &str = "node_modules";

/// Resolve every root, in order, into one compilation context.
///
/// Roots and `out_dir` must be absolute and normalized. Fails on the first
/// missing root, duplicate input or basename collision.
pub fn resolve_inputs(roots: &[PathBuf], out_dir: &Path) -> Result<CompilationContext, PlanError> {
    let mut context = CompilationContext::new(out_dir.to_path_buf());

    for path in roots {
        let root = InputRoot::classify(path.clone());
        let files = match root.kind {
            InputRootKind::File => {
                if !root.path.is_file() {
                    return Err(PlanError::MissingInput(root.path.clone()));
                }
                vec![root.path.clone()]
            }
            InputRootKind::Directory => {
                if !root.path.is_dir() {
                    return Err(PlanError::MissingInput(root.path.clone()));
                }
                discover_sources(&root.path)?
            }
        };
        debug!("input {} ({:?}): {} file(s)", root.path.display(), root.kind, files.len());

        for source in files {
            let source_dir = source.parent().unwrap_or(root.path.as_path()).to_path_buf();
            let output_dir = rerooted(out_dir, root.base_dir(), &source_dir);
            trace!("{} -> {}", source.display(), output_dir.display());

            if root.kind == InputRootKind::Directory {
                record_directories(&mut context, &root.path, &source_dir, out_dir);
            }
            context.insert_file(CompilationFile {
                source,
                root: root.clone(),
                output_dir,
            })?;
        }
    }

    Ok(context)
}

/// `out_dir / relative(base, dir)`.
fn rerooted(out_dir: &Path, base: &Path, dir: &Path) -> PathBuf {
    normalize_path(&out_dir.join(relative_path(base, dir)))
}

/// Record `dir` and each of its ancestors up to and including `root`.
fn record_directories(context: &mut CompilationContext, root: &Path, dir: &Path, out_dir: &Path) {
    for ancestor in dir.ancestors() {
        if !ancestor.starts_with(root) {
            break;
        }
        context.record_directory(ancestor.to_path_buf(), rerooted(out_dir, root, ancestor));
    }
}

/// Every source file beneath `root`, sorted, skipping `node_modules`.
fn discover_sources(root: &Path) -> Result<Vec<PathBuf>, PlanError> {
    let pattern = format!("{}/**/*", glob::Pattern::escape(&root.to_string_lossy()));
    let entries = glob::glob(&pattern).map_err(|e| PlanError::Pattern(e.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PlanError::Io {
            path: e.path().to_path_buf(),
            source: io::Error::from(e),
        })?;
        if in_node_modules(root, &path) || !has_source_extension(&path) || !path.is_file() {
            continue;
        }
        files.push(normalize_path(&path));
    }
    files.sort();
    Ok(files)
}

fn in_node_modules(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .map(|rel| {
            rel.components()
                .any(|c| matches!(c, Component::Normal(name) if name == NODE_MODULES))
        })
        .unwrap_or(false)
}
