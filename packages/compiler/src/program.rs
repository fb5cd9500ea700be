//! OXC-backed Program
//!
//! Holds every root file of one compilation unit in memory and implements
//! `CompilerEngine` on top of the oxc parser, semantic checker, isolated
//! declaration generator, TypeScript transformer and code generator.

use crate::diagnostics::{
    to_diagnostics, DECLARATION_ERROR, PARSE_ERROR, SEMANTIC_ERROR, TRANSFORM_ERROR,
};
use crate::engine::{CompilerEngine, EngineError, PreEmitTransform, WriteFileCallback};
use log::debug;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_isolated_declarations::{IsolatedDeclarations, IsolatedDeclarationsOptions};
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use ts::{is_declaration_file, strip_source_extension, CompilerOptions, Diagnostic, OutputKind};

/// A source file loaded into the program.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: PathBuf,
    pub text: String,
}

pub struct OxcProgram {
    options: CompilerOptions,
    root_names: Vec<PathBuf>,
    source_files: HashMap<PathBuf, SourceFile>,
}

impl OxcProgram {
    /// Create a program by reading every root file from disk.
    pub fn new(root_names: Vec<PathBuf>, options: CompilerOptions) -> Result<Self, EngineError> {
        let mut sources = Vec::with_capacity(root_names.len());
        for path in root_names {
            let text = fs::read_to_string(&path).map_err(|source| EngineError::Io {
                path: path.clone(),
                source,
            })?;
            sources.push((path, text));
        }
        Ok(Self::from_sources(sources, options))
    }

    /// Create a program from in-memory sources.
    pub fn from_sources(sources: Vec<(PathBuf, String)>, options: CompilerOptions) -> Self {
        let mut root_names = Vec::with_capacity(sources.len());
        let mut source_files = HashMap::with_capacity(sources.len());
        for (file_name, text) in sources {
            root_names.push(file_name.clone());
            source_files.insert(file_name.clone(), SourceFile { file_name, text });
        }
        OxcProgram {
            options,
            root_names,
            source_files,
        }
    }

    fn source_file(&self, file: &Path) -> Result<&SourceFile, EngineError> {
        self.source_files
            .get(file)
            .ok_or_else(|| EngineError::UnknownSourceFile(file.to_path_buf()))
    }

    fn file_diagnostics(&self, source_file: &SourceFile) -> Vec<Diagnostic> {
        let path = source_file.file_name.as_path();
        let text = source_file.text.as_str();
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, text, source_type_for(path)).parse();
        if !ret.errors.is_empty() {
            return to_diagnostics(&ret.errors, PARSE_ERROR, path, text);
        }
        let mut program = ret.program;

        let semantic = SemanticBuilder::new()
            .with_check_syntax_error(true)
            .build(&program);
        let mut diagnostics = to_diagnostics(&semantic.errors, SEMANTIC_ERROR, path, text);
        if is_declaration_file(path) {
            return diagnostics;
        }

        if self.options.declaration {
            let declarations =
                IsolatedDeclarations::new(&allocator, IsolatedDeclarationsOptions { strip_internal: false })
                    .build(&program);
            diagnostics.extend(to_diagnostics(&declarations.errors, DECLARATION_ERROR, path, text));
        }

        // Lowering errors are reported before emit, not during it.
        let scoping = semantic.semantic.into_scoping();
        let transform_options = TransformOptions::default();
        let transformed = Transformer::new(&allocator, path, &transform_options)
            .build_with_scoping(scoping, &mut program);
        diagnostics.extend(to_diagnostics(&transformed.errors, TRANSFORM_ERROR, path, text));
        diagnostics
    }
}

impl CompilerEngine for OxcProgram {
    fn pre_emit_diagnostics(&self) -> Vec<Diagnostic> {
        self.root_names
            .iter()
            .filter_map(|name| self.source_files.get(name))
            .flat_map(|source_file| self.file_diagnostics(source_file))
            .collect()
    }

    fn emit_file(
        &self,
        file: &Path,
        write_file: &mut WriteFileCallback<'_>,
        transforms: &mut [&mut dyn PreEmitTransform],
    ) -> Result<(), EngineError> {
        let source_file = self.source_file(file)?;
        if is_declaration_file(file) {
            return Err(EngineError::DeclarationFile(file.to_path_buf()));
        }

        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, &source_file.text, source_type_for(file)).parse();
        if let Some(error) = ret.errors.first() {
            return Err(EngineError::Parse {
                path: file.to_path_buf(),
                message: error.message.to_string(),
            });
        }
        let mut program = ret.program;

        for transform in transforms.iter_mut() {
            transform.transform(&allocator, &mut program, file);
        }

        let stem = file
            .file_name()
            .and_then(|name| name.to_str())
            .map(strip_source_extension)
            .unwrap_or_default()
            .to_string();
        let out_dir = file.parent().unwrap_or(Path::new("."));
        let mut write = |kind: OutputKind, text: &str| -> Result<(), EngineError> {
            let out_path = out_dir.join(format!("{}{}", stem, kind.suffix()));
            debug!("engine emitted {}", out_path.display());
            write_file(&out_path, text).map_err(|source| EngineError::Io {
                path: out_path.clone(),
                source,
            })
        };

        // Declarations are generated from the typed tree, before type stripping.
        if self.options.declaration {
            let declarations =
                IsolatedDeclarations::new(&allocator, IsolatedDeclarationsOptions { strip_internal: false })
                    .build(&program);
            let (code, map) = generate(
                &declarations.program,
                file,
                self.options.emits_declaration_map(),
                &format!("{}{}", stem, OutputKind::DeclarationMap.suffix()),
            );
            write(OutputKind::Declaration, &code)?;
            if let Some(map) = map {
                write(OutputKind::DeclarationMap, &map)?;
            }
        }

        let semantic = SemanticBuilder::new()
            .with_excess_capacity(0.0)
            .build(&program);
        let transform_options = TransformOptions::default();
        let transformer = Transformer::new(&allocator, file, &transform_options);
        let transformed =
            transformer.build_with_scoping(semantic.semantic.into_scoping(), &mut program);
        if let Some(error) = transformed.errors.first() {
            return Err(EngineError::Transform {
                path: file.to_path_buf(),
                message: error.message.to_string(),
            });
        }

        let (code, map) = generate(
            &program,
            file,
            self.options.source_map,
            &format!("{}{}", stem, OutputKind::ScriptMap.suffix()),
        );
        write(OutputKind::Script, &code)?;
        if let Some(map) = map {
            write(OutputKind::ScriptMap, &map)?;
        }
        Ok(())
    }
}

fn source_type_for(path: &Path) -> SourceType {
    SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts())
}

/// Generate code, and a source map plus its `sourceMappingURL` comment when
/// requested.
fn generate(
    program: &Program<'_>,
    source_path: &Path,
    with_map: bool,
    map_file_name: &str,
) -> (String, Option<String>) {
    let options = CodegenOptions {
        source_map_path: with_map.then(|| source_path.to_path_buf()),
        ..CodegenOptions::default()
    };
    let ret = Codegen::new().with_options(options).build(program);
    let mut code = ret.code;
    let map = ret.map.map(|map| map.to_json_string());
    if map.is_some() {
        if !code.ends_with('\n') {
            code.push('\n');
        }
        code.push_str(&format!("//# sourceMappingURL={}\n", map_file_name));
    }
    (code, map)
}
