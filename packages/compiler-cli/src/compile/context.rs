// Compilation Context
//
// The per-invocation maps built by the input resolver: source file to output
// directory, input directory to output directory, and the basenames claimed
// in each output directory. Built once, read-only afterwards.

use crate::error::PlanError;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use ts::{has_source_extension, is_declaration_file, strip_source_extension};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRootKind {
    File,
    Directory,
}

/// A user-specified file or directory to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRoot {
    pub path: PathBuf,
    pub kind: InputRootKind,
}

impl InputRoot {
    /// Classify by extension: a recognized source extension is a file root,
    /// anything else a directory root.
    pub fn classify(path: PathBuf) -> Self {
        let kind = if has_source_extension(&path) {
            InputRootKind::File
        } else {
            InputRootKind::Directory
        };
        InputRoot { path, kind }
    }

    /// The directory output paths are computed relative to.
    pub fn base_dir(&self) -> &Path {
        match self.kind {
            InputRootKind::File => self.path.parent().unwrap_or(self.path.as_path()),
            InputRootKind::Directory => &self.path,
        }
    }
}

/// One source file of the unit and where its outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationFile {
    pub source: PathBuf,
    pub root: InputRoot,
    pub output_dir: PathBuf,
}

impl CompilationFile {
    /// File name without its source extension, `foo.d.ts` gives `foo`.
    pub fn basename(&self) -> &str {
        let name = self
            .source
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("");
        strip_source_extension(name)
    }

    pub fn is_declaration(&self) -> bool {
        is_declaration_file(&self.source)
    }
}

/// An output directory and the basenames already claimed in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDirectory {
    pub path: PathBuf,
    basenames: HashMap<String, PathBuf>,
}

impl OutputDirectory {
    fn new(path: PathBuf) -> Self {
        OutputDirectory {
            path,
            basenames: HashMap::new(),
        }
    }

    /// The source file that claimed `basename`, if any.
    pub fn claimant(&self, basename: &str) -> Option<&Path> {
        self.basenames.get(basename).map(PathBuf::as_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationContext {
    out_dir: PathBuf,
    files: IndexMap<PathBuf, CompilationFile>,
    directories: IndexMap<PathBuf, PathBuf>,
    output_directories: IndexMap<PathBuf, OutputDirectory>,
}

impl CompilationContext {
    pub fn new(out_dir: PathBuf) -> Self {
        CompilationContext {
            out_dir,
            files: IndexMap::new(),
            directories: IndexMap::new(),
            output_directories: IndexMap::new(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Add a file to the unit. Rejects a source path seen before, then a
    /// basename already claimed in the same output directory.
    pub fn insert_file(&mut self, file: CompilationFile) -> Result<(), PlanError> {
        if let Some(existing) = self.files.get(&file.source) {
            return Err(PlanError::DuplicateInput {
                path: file.source.clone(),
                first_root: existing.root.path.clone(),
                second_root: file.root.path.clone(),
            });
        }

        let basename = file.basename().to_string();
        let output = self
            .output_directories
            .entry(file.output_dir.clone())
            .or_insert_with(|| OutputDirectory::new(file.output_dir.clone()));
        if let Some(existing) = output.claimant(&basename) {
            if existing != file.source {
                return Err(PlanError::BasenameCollision {
                    output_dir: file.output_dir.clone(),
                    basename,
                    existing: existing.to_path_buf(),
                    incoming: file.source.clone(),
                });
            }
        }
        output.basenames.insert(basename, file.source.clone());

        self.files.insert(file.source.clone(), file);
        Ok(())
    }

    /// Map an input directory of a directory root to its output directory.
    /// The first mapping recorded for a directory is kept.
    pub fn record_directory(&mut self, input_dir: PathBuf, output_dir: PathBuf) {
        self.directories.entry(input_dir).or_insert(output_dir);
    }

    pub fn file(&self, source: &Path) -> Option<&CompilationFile> {
        self.files.get(source)
    }

    pub fn directory_output(&self, input_dir: &Path) -> Option<&Path> {
        self.directories.get(input_dir).map(PathBuf::as_path)
    }

    /// Files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &CompilationFile> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Source paths in insertion order, as handed to the engine.
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.files.keys().cloned().collect()
    }

    pub fn output_directories(&self) -> impl Iterator<Item = &OutputDirectory> {
        self.output_directories.values()
    }
}
