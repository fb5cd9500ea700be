// Import Specifier Rewriter
//
// Resolves a relative specifier against the importer's source location and
// recomputes it from the importer's output directory.

use crate::compile::CompilationContext;
use crate::config::PathMapTable;
use crate::util::{
    append_extension, is_relative_specifier, normalize_path, relative_path, to_module_specifier,
};
use std::path::{Path, PathBuf};
use ts::SOURCE_EXTENSIONS;

/// Outcome of rewriting one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecifierRewrite {
    /// Bare or absolute specifier, left to ordinary module resolution.
    NotRelative,
    /// Relative, but no known destination. Left unchanged.
    Unresolved,
    Rewritten(String),
}

/// A relative specifier no resolution strategy could place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedSpecifier {
    pub importer: PathBuf,
    pub specifier: String,
    /// Byte offset of the string literal in the importer's source text.
    pub start: usize,
    pub length: usize,
    /// 1-based line and column of `start`.
    pub location: (usize, usize),
}

#[derive(Debug, Clone, Copy)]
pub struct ImportRewriter<'c> {
    context: &'c CompilationContext,
    path_map: &'c PathMapTable,
}

impl<'c> ImportRewriter<'c> {
    pub fn new(context: &'c CompilationContext, path_map: &'c PathMapTable) -> Self {
        ImportRewriter { context, path_map }
    }

    /// Where an extensionless importee path lives after relocation.
    ///
    /// Tries, in order: an input directory, a compiled file with any source
    /// extension, then the path map table. Declaration inputs are never
    /// emitted, so they resolve to where they already are.
    pub fn resolve_destination(&self, importee: &Path) -> Option<PathBuf> {
        if let Some(output_dir) = self.context.directory_output(importee) {
            return Some(output_dir.to_path_buf());
        }

        if let Some(name) = importee.file_name() {
            for extension in SOURCE_EXTENSIONS {
                let candidate = append_extension(importee, extension);
                if let Some(file) = self.context.file(&candidate) {
                    if file.is_declaration() {
                        return Some(importee.to_path_buf());
                    }
                    return Some(file.output_dir.join(name));
                }
            }
        }

        self.path_map.map(importee)
    }

    /// Rewrite `specifier` as imported from the source file `importer`.
    pub fn rewrite(&self, importer: &Path, specifier: &str) -> SpecifierRewrite {
        if !is_relative_specifier(specifier) {
            return SpecifierRewrite::NotRelative;
        }
        let (Some(source_dir), Some(importer_file)) = (importer.parent(), self.context.file(importer))
        else {
            return SpecifierRewrite::Unresolved;
        };

        let importee = normalize_path(&source_dir.join(specifier));
        match self.resolve_destination(&importee) {
            Some(destination) => SpecifierRewrite::Rewritten(to_module_specifier(&relative_path(
                &importer_file.output_dir,
                &destination,
            ))),
            None => SpecifierRewrite::Unresolved,
        }
    }
}
