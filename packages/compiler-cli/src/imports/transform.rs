// Import Specifier Transform
//
// Pre-emit transform that applies the import rewriter to every module
// specifier string literal in a parsed source tree.

use super::rewriter::{ImportRewriter, SpecifierRewrite, UnresolvedSpecifier};
use log::{debug, trace};
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ExportAllDeclaration, ExportNamedDeclaration, Expression, ImportDeclaration, ImportExpression,
    Program, StringLiteral, TSImportEqualsDeclaration, TSImportType, TSLiteral,
    TSModuleReference, TSType,
};
use oxc_ast_visit::{walk_mut, VisitMut};
use oxc_span::Atom;
use std::path::{Path, PathBuf};
use ts::line_and_column;
use tsmerge_compiler::PreEmitTransform;

/// Rewrites specifiers in import and export declarations, import-equals
/// declarations, `import("…")` types and dynamic `import()` calls with a
/// literal argument.
pub struct ImportSpecifierTransform<'r> {
    rewriter: ImportRewriter<'r>,
    unresolved: Vec<UnresolvedSpecifier>,
}

impl<'r> ImportSpecifierTransform<'r> {
    pub fn new(rewriter: ImportRewriter<'r>) -> Self {
        ImportSpecifierTransform {
            rewriter,
            unresolved: Vec::new(),
        }
    }

    /// Relative specifiers left unchanged so far, in visit order.
    pub fn take_unresolved(&mut self) -> Vec<UnresolvedSpecifier> {
        std::mem::take(&mut self.unresolved)
    }
}

impl PreEmitTransform for ImportSpecifierTransform<'_> {
    fn transform<'a>(
        &mut self,
        allocator: &'a Allocator,
        program: &mut Program<'a>,
        source_path: &Path,
    ) {
        let mut visitor = SpecifierVisitor {
            allocator,
            source_text: program.source_text,
            importer: source_path,
            rewriter: &self.rewriter,
            unresolved: &mut self.unresolved,
        };
        visitor.visit_program(program);
    }
}

struct SpecifierVisitor<'a, 't> {
    allocator: &'a Allocator,
    source_text: &'a str,
    importer: &'t Path,
    rewriter: &'t ImportRewriter<'t>,
    unresolved: &'t mut Vec<UnresolvedSpecifier>,
}

impl<'a> SpecifierVisitor<'a, '_> {
    fn rewrite_literal(&mut self, literal: &mut StringLiteral<'a>) {
        let specifier = literal.value.to_string();
        match self.rewriter.rewrite(self.importer, &specifier) {
            SpecifierRewrite::NotRelative => {}
            SpecifierRewrite::Unresolved => {
                debug!(
                    "{}: leaving unresolved specifier '{}'",
                    self.importer.display(),
                    specifier
                );
                let start = literal.span.start as usize;
                self.unresolved.push(UnresolvedSpecifier {
                    importer: PathBuf::from(self.importer),
                    start,
                    length: literal.span.size() as usize,
                    location: line_and_column(self.source_text, start),
                    specifier,
                });
            }
            SpecifierRewrite::Rewritten(rewritten) => {
                trace!("{}: '{}' -> '{}'", self.importer.display(), specifier, rewritten);
                if rewritten != specifier {
                    literal.value = Atom::from(self.allocator.alloc_str(&rewritten));
                    literal.raw = None;
                }
            }
        }
    }
}

impl<'a> VisitMut<'a> for SpecifierVisitor<'a, '_> {
    fn visit_import_declaration(&mut self, it: &mut ImportDeclaration<'a>) {
        self.rewrite_literal(&mut it.source);
    }

    fn visit_export_all_declaration(&mut self, it: &mut ExportAllDeclaration<'a>) {
        self.rewrite_literal(&mut it.source);
    }

    fn visit_export_named_declaration(&mut self, it: &mut ExportNamedDeclaration<'a>) {
        if let Some(source) = it.source.as_mut() {
            self.rewrite_literal(source);
        }
        walk_mut::walk_export_named_declaration(self, it);
    }

    fn visit_ts_import_equals_declaration(&mut self, it: &mut TSImportEqualsDeclaration<'a>) {
        if let TSModuleReference::ExternalModuleReference(reference) = &mut it.module_reference {
            self.rewrite_literal(&mut reference.expression);
        }
    }

    fn visit_ts_import_type(&mut self, it: &mut TSImportType<'a>) {
        if let TSType::TSLiteralType(literal_type) = &mut it.argument {
            if let TSLiteral::StringLiteral(literal) = &mut literal_type.literal {
                self.rewrite_literal(literal);
            }
        }
        walk_mut::walk_ts_import_type(self, it);
    }

    fn visit_import_expression(&mut self, it: &mut ImportExpression<'a>) {
        if let Expression::StringLiteral(literal) = &mut it.source {
            self.rewrite_literal(literal);
        }
        walk_mut::walk_import_expression(self, it);
    }
}
