// Emission Orchestrator
//
// Drives the engine one file at a time with the import specifier transform
// installed, then relocates each captured artifact into the file's output
// directory.

use super::context::{CompilationContext, CompilationFile};
use crate::config::PathMapTable;
use crate::error::CompileError;
use crate::file_system::FileSystem;
use crate::imports::{ImportRewriter, ImportSpecifierTransform, UnresolvedSpecifier};
use crate::sourcemaps::relocate_source_map;
use bitflags::bitflags;
use log::{debug, warn};
use smallvec::SmallVec;
use std::io;
use std::path::{Path, PathBuf};
use ts::{CompilerOptions, OutputKind};
use tsmerge_compiler::{CompilerEngine, PreEmitTransform};

bitflags! {
    /// Artifact kinds to be written for each emitted file.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EmitFlags: u32 {
        const JS = 0b0001;
        const JS_MAP = 0b0010;
        const DTS = 0b0100;
        const DTS_MAP = 0b1000;
    }
}

impl EmitFlags {
    pub fn from_options(options: &CompilerOptions) -> Self {
        let mut flags = EmitFlags::JS;
        flags.set(EmitFlags::JS_MAP, options.source_map);
        flags.set(EmitFlags::DTS, options.declaration);
        flags.set(EmitFlags::DTS_MAP, options.emits_declaration_map());
        flags
    }

    pub fn allows(&self, kind: OutputKind) -> bool {
        let flag = match kind {
            OutputKind::Script => EmitFlags::JS,
            OutputKind::ScriptMap => EmitFlags::JS_MAP,
            OutputKind::Declaration => EmitFlags::DTS,
            OutputKind::DeclarationMap => EmitFlags::DTS_MAP,
        };
        self.contains(flag)
    }
}

/// What one emission pass produced.
#[derive(Debug, Clone, Default)]
pub struct EmitSummary {
    /// Every path written, in write order.
    pub written: Vec<PathBuf>,
    /// Relative specifiers that could not be placed, per importer.
    pub unresolved: Vec<UnresolvedSpecifier>,
    pub emitted_files: usize,
}

#[derive(Debug)]
struct EmittedArtifact {
    kind: OutputKind,
    text: String,
}

/// Emit every non-declaration file of `context`, in insertion order.
///
/// Output directories must already exist. The first engine or write failure
/// stops the loop.
pub fn emit_files(
    engine: &dyn CompilerEngine,
    context: &CompilationContext,
    path_map: &PathMapTable,
    options: &CompilerOptions,
    fs: &dyn FileSystem,
) -> Result<EmitSummary, CompileError> {
    let flags = EmitFlags::from_options(options);
    let mut summary = EmitSummary::default();

    for file in context.files() {
        if file.is_declaration() {
            debug!("not emitting declaration input {}", file.source.display());
            continue;
        }
        debug!("emitting {} into {}", file.source.display(), file.output_dir.display());

        let mut artifacts: SmallVec<[EmittedArtifact; 4]> = SmallVec::new();
        let mut transform = ImportSpecifierTransform::new(ImportRewriter::new(context, path_map));
        {
            let mut capture = |path: &Path, text: &str| -> io::Result<()> {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                match OutputKind::from_file_name(name) {
                    Some(kind) => artifacts.push(EmittedArtifact {
                        kind,
                        text: text.to_string(),
                    }),
                    None => warn!("ignoring unexpected engine output {}", path.display()),
                }
                Ok(())
            };
            let mut transforms: [&mut dyn PreEmitTransform; 1] = [&mut transform];
            engine.emit_file(&file.source, &mut capture, &mut transforms)?;
        }
        summary.unresolved.extend(transform.take_unresolved());

        for artifact in artifacts {
            if !flags.allows(artifact.kind) {
                continue;
            }
            let target = write_artifact(fs, file, &artifact)?;
            summary.written.push(target);
        }
        summary.emitted_files += 1;
    }

    Ok(summary)
}

fn write_artifact(
    fs: &dyn FileSystem,
    file: &CompilationFile,
    artifact: &EmittedArtifact,
) -> Result<PathBuf, CompileError> {
    let file_name = format!("{}{}", file.basename(), artifact.kind.suffix());
    let target = file.output_dir.join(&file_name);

    let text = if artifact.kind.is_source_map() {
        let generated = file_name.trim_end_matches(".map");
        relocate_source_map(&artifact.text, &file.output_dir, &file.source, generated).map_err(
            |source| CompileError::SourceMap {
                path: target.clone(),
                source,
            },
        )?
    } else {
        artifact.text.clone()
    };

    fs.write_file(&target, text.as_bytes())
        .map_err(|source| CompileError::Io {
            path: target.clone(),
            source,
        })?;
    Ok(target)
}
