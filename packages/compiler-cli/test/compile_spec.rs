//! Compile Tests
//!
//! End-to-end runs of the orchestrator over on-disk fixtures, with every
//! write captured instead of performed.

use clap::Parser;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tsmerge_cli::config::{read_configuration, CommandLineArgs};
use tsmerge_cli::error::{CompileError, PlanError};
use tsmerge_cli::file_system::testing::CapturingFileSystem;
use tsmerge_cli::main_entry::main_fn;
use tsmerge_cli::perform_compile::{perform_compilation, CompilationResult};
use tsmerge_cli::sourcemaps::RawSourceMap;

struct Fixture {
    _dir: TempDir,
    root: PathBuf,
}

impl Fixture {
    fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        for (rel, text) in files {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, text).unwrap();
        }
        Fixture { _dir: dir, root }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    fn compile(&self, args: &[&str]) -> (Result<CompilationResult, CompileError>, CapturingFileSystem) {
        let args = CommandLineArgs::try_parse_from(std::iter::once("tsmerge").chain(args.iter().copied()))
            .unwrap();
        let config = read_configuration(&args, &self.root).unwrap();
        let fs = CapturingFileSystem::new();
        let result = perform_compilation(&config, &fs);
        (result, fs)
    }

    fn run_main(&self, args: &[&str]) -> (i32, Vec<String>, CapturingFileSystem) {
        let args = CommandLineArgs::try_parse_from(std::iter::once("tsmerge").chain(args.iter().copied()))
            .unwrap();
        let fs = CapturingFileSystem::new();
        let output = RefCell::new(Vec::new());
        let code = main_fn(&args, &self.root, &fs, |msg| output.borrow_mut().push(msg.to_string()));
        (code, output.into_inner(), fs)
    }
}

fn two_roots() -> Fixture {
    Fixture::new(&[
        ("src1/foo.ts", "export const foo: number = 1;\n"),
        (
            "src2/bar.ts",
            "import { foo } from '../src1/foo';\nexport const bar: number = foo + 1;\n",
        ),
    ])
}

#[test]
fn should_merge_two_roots_and_rewrite_the_import() {
    let fixture = two_roots();
    let (result, fs) = fixture.compile(&["-o", "lib", "src1", "src2"]);
    let result = result.unwrap();

    assert!(!result.has_errors());
    assert_eq!(fs.created_dirs(), vec![fixture.path("lib")]);
    assert_eq!(
        result.written,
        vec![fixture.path("lib/foo.js"), fixture.path("lib/bar.js")]
    );

    let bar = fs.file(fixture.path("lib/bar.js")).unwrap();
    assert!(bar.contains("from \"./foo\""), "{bar}");
    assert!(!bar.contains("src1"), "{bar}");
}

#[test]
fn should_write_only_requested_artifacts() {
    let fixture = two_roots();
    let (result, fs) = fixture.compile(&["-o", "lib", "-d", "-m", "src1", "src2"]);
    result.unwrap();

    let mut written: Vec<PathBuf> = fs.files().keys().cloned().collect();
    written.sort();
    assert_eq!(
        written,
        vec![
            fixture.path("lib/bar.d.ts"),
            fixture.path("lib/bar.js"),
            fixture.path("lib/bar.js.map"),
            fixture.path("lib/foo.d.ts"),
            fixture.path("lib/foo.js"),
            fixture.path("lib/foo.js.map"),
        ]
    );
}

#[test]
fn should_point_source_maps_at_the_original_source() {
    let fixture = two_roots();
    let (result, fs) = fixture.compile(&[
        "-o", "lib", "-d", "--declaration-map", "-m", "src1", "src2",
    ]);
    result.unwrap();

    let map = RawSourceMap::parse(&fs.file(fixture.path("lib/bar.js.map")).unwrap()).unwrap();
    assert_eq!(map.sources, vec!["../src2/bar.ts"]);
    assert_eq!(map.file.as_deref(), Some("bar.js"));

    let map = RawSourceMap::parse(&fs.file(fixture.path("lib/foo.d.ts.map")).unwrap()).unwrap();
    assert_eq!(map.sources, vec!["../src1/foo.ts"]);
    assert_eq!(map.file.as_deref(), Some("foo.d.ts"));

    let js = fs.file(fixture.path("lib/bar.js")).unwrap();
    assert!(js.contains("//# sourceMappingURL=bar.js.map"), "{js}");
}

#[test]
fn should_rewrite_specifiers_in_declarations() {
    let fixture = Fixture::new(&[
        ("src1/foo.ts", "export interface Foo { a: number }\n"),
        ("src2/bar.ts", "export type { Foo } from '../src1/foo';\n"),
    ]);
    let (result, fs) = fixture.compile(&["-o", "lib", "-d", "src1", "src2"]);
    result.unwrap();

    let dts = fs.file(fixture.path("lib/bar.d.ts")).unwrap();
    assert!(dts.contains("\"./foo\""), "{dts}");
}

#[test]
fn should_rewrite_type_imports_in_declarations() {
    let fixture = Fixture::new(&[
        ("src1/foo.ts", "export interface Foo { a: number }\n"),
        ("src2/bar.ts", "export type Bar = import('../src1/foo').Foo;\n"),
    ]);
    let (result, fs) = fixture.compile(&["-o", "lib", "-d", "src1", "src2"]);
    result.unwrap();

    let dts = fs.file(fixture.path("lib/bar.d.ts")).unwrap();
    assert!(dts.contains("import(\"./foo\")"), "{dts}");
    assert!(!dts.contains("src1"), "{dts}");
}

#[test]
fn should_fail_on_duplicate_input_before_any_io() {
    let fixture = two_roots();
    let (result, fs) = fixture.compile(&["-o", "lib", "src1", "src1/foo.ts"]);

    match result {
        Err(CompileError::Plan(PlanError::DuplicateInput { path, .. })) => {
            assert_eq!(path, fixture.path("src1/foo.ts"));
        }
        other => panic!("expected a duplicate input error, got {other:?}"),
    }
    assert!(fs.is_untouched());
}

#[test]
fn should_fail_on_basename_collision_before_any_io() {
    let fixture = Fixture::new(&[
        ("a/util.ts", "export const a: number = 1;\n"),
        ("b/util.tsx", "export const b: number = 2;\n"),
    ]);
    let (result, fs) = fixture.compile(&["-o", "lib", "a", "b"]);

    match result {
        Err(CompileError::Plan(PlanError::BasenameCollision {
            output_dir,
            basename,
            existing,
            incoming,
        })) => {
            assert_eq!(output_dir, fixture.path("lib"));
            assert_eq!(basename, "util");
            assert_eq!(existing, fixture.path("a/util.ts"));
            assert_eq!(incoming, fixture.path("b/util.tsx"));
        }
        other => panic!("expected a collision error, got {other:?}"),
    }
    assert!(fs.is_untouched());
}

#[test]
fn should_create_only_the_deepest_directories() {
    let fixture = Fixture::new(&[
        ("src/a/x.ts", "export const x: number = 1;\n"),
        ("src/a/b/y.ts", "export const y: number = 2;\n"),
        ("src/ab/z.ts", "export const z: number = 3;\n"),
    ]);
    let (result, fs) = fixture.compile(&["-o", "out", "src"]);
    result.unwrap();

    assert_eq!(
        fs.created_dirs(),
        vec![fixture.path("out/a/b"), fixture.path("out/ab")]
    );
    assert!(fs.file(fixture.path("out/a/x.js")).is_some());
    assert!(fs.file(fixture.path("out/a/b/y.js")).is_some());
}

#[test]
fn should_not_emit_declaration_inputs() {
    let fixture = Fixture::new(&[
        ("src/types.d.ts", "export interface Shape { sides: number }\n"),
        ("src/shape.ts", "import type { Shape } from './types';\nexport const square: Shape = { sides: 4 };\n"),
    ]);
    let (result, fs) = fixture.compile(&["-o", "lib", "src"]);
    let result = result.unwrap();

    assert_eq!(result.written, vec![fixture.path("lib/shape.js")]);
    assert!(fs.file(fixture.path("lib/types.js")).is_none());
}

#[test]
fn should_point_declaration_imports_at_the_declaration_input() {
    let fixture = Fixture::new(&[
        ("src/types.d.ts", "export interface Shape { sides: number }\n"),
        ("src/shape.ts", "import type { Shape } from './types';\nexport const square: Shape = { sides: 4 };\n"),
    ]);
    let (result, fs) = fixture.compile(&["-o", "lib", "-d", "src"]);
    result.unwrap();

    let dts = fs.file(fixture.path("lib/shape.d.ts")).unwrap();
    assert!(dts.contains("\"../src/types\""), "{dts}");
    assert!(fs.file(fixture.path("lib/types.d.ts")).is_none());
}

#[test]
fn should_abort_on_errors_without_writing() {
    let fixture = Fixture::new(&[("src/broken.ts", "export const = ;\n")]);
    let (result, fs) = fixture.compile(&["-o", "lib", "src"]);
    let result = result.unwrap();

    assert!(result.has_errors());
    assert!(result.written.is_empty());
    assert!(fs.is_untouched());
}

#[test]
fn should_fail_on_lowering_errors_without_writing() {
    let fixture = Fixture::new(&[("src/ns.ts", "namespace N { export let x = 1; }\n")]);
    let (code, output, fs) = fixture.run_main(&["-o", "lib", "src"]);

    assert_eq!(code, 1);
    assert!(fs.is_untouched());
    let output = output.join("\n");
    assert!(output.contains("TS1200"), "{output}");
    assert!(output.contains("ns.ts"), "{output}");
}

#[test]
fn should_demote_declaration_errors_with_warn_flag() {
    let fixture = Fixture::new(&[("src/untyped.ts", "export const n = Math.random();\n")]);

    let (result, fs) = fixture.compile(&["-o", "lib", "-d", "src"]);
    let result = result.unwrap();
    assert!(result.has_errors());
    assert!(fs.is_untouched());

    let (result, fs) = fixture.compile(&["-o", "lib", "-d", "-W", "declarations", "src"]);
    let result = result.unwrap();
    assert!(!result.has_errors());
    assert!(result.counts.warnings > 0);
    assert!(fs.file(fixture.path("lib/untyped.js")).is_some());
}

#[test]
fn should_report_unresolved_imports_in_strict_mode() {
    let fixture = Fixture::new(&[(
        "src/app.ts",
        "import { v } from '../vendor/v';\nexport const app: number = v;\n",
    )]);

    let (result, _) = fixture.compile(&["-o", "lib", "src"]);
    let result = result.unwrap();
    assert!(result.diagnostics.is_empty());

    let (result, fs) = fixture.compile(&["-o", "lib", "--strict-imports", "src"]);
    let result = result.unwrap();
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, 2307);
    assert_eq!(result.diagnostics[0].location, Some((1, 19)));
    assert_eq!(result.diagnostics[0].file.as_deref(), Some(fixture.path("src/app.ts").as_path()));
    assert_eq!(result.counts.warnings, 1);

    let app = fs.file(fixture.path("lib/app.js")).unwrap();
    assert!(app.contains("\"../vendor/v\""), "{app}");
}

#[test]
fn should_rewrite_through_path_map() {
    let fixture = Fixture::new(&[(
        "src/app.ts",
        "import { v } from '../vendor/v';\nexport const app: number = v;\n",
    )]);
    let (result, fs) = fixture.compile(&["-o", "lib", "-P", "vendor:dist/vendor", "src"]);
    result.unwrap();

    let app = fs.file(fixture.path("lib/app.js")).unwrap();
    assert!(app.contains("\"../dist/vendor/v\""), "{app}");
}

#[test]
fn main_should_be_silent_on_success() {
    let fixture = two_roots();
    let (code, output, fs) = fixture.run_main(&["-o", "lib", "src1", "src2"]);
    assert_eq!(code, 0);
    assert!(output.is_empty(), "{output:?}");
    assert_eq!(fs.files().len(), 2);
}

#[test]
fn main_should_summarize_errors() {
    let fixture = Fixture::new(&[("src/broken.ts", "export const = ;\n")]);
    let (code, output, _) = fixture.run_main(&["-o", "lib", "src"]);
    assert_eq!(code, 1);
    assert!(output[0].contains("error TS1005"), "{output:?}");
    let summary = output.last().unwrap();
    assert!(summary.starts_with("Found ") && summary.ends_with("error(s) and 0 warning(s)."), "{summary}");
}

#[test]
fn main_should_fail_warnings_as_errors() {
    let fixture = Fixture::new(&[(
        "src/app.ts",
        "import { v } from '../vendor/v';\nexport const app: number = v;\n",
    )]);
    let (code, output, _) = fixture.run_main(&["-o", "lib", "--strict-imports", "-W", "error", "src"]);
    assert_eq!(code, 1);
    assert_eq!(output.last().unwrap(), "Found 1 error(s) and 0 warning(s).");
}

#[test]
fn main_should_reject_bad_configuration() {
    let fixture = two_roots();

    let (code, output, fs) = fixture.run_main(&["src1"]);
    assert_eq!(code, 1);
    assert!(output[0].starts_with("error: "), "{output:?}");
    assert!(fs.is_untouched());

    let (code, output, _) = fixture.run_main(&["-o", "lib", "-P", "a:b:c", "src1"]);
    assert_eq!(code, 1);
    assert!(output[0].contains("a:b:c"), "{output:?}");

    let (code, _, _) = fixture.run_main(&["-o", "lib", "-W", "nonsense", "src1"]);
    assert_eq!(code, 1);
}

#[test]
fn main_should_report_missing_input() {
    let fixture = two_roots();
    let (code, output, fs) = fixture.run_main(&["-o", "lib", "src3"]);
    assert_eq!(code, 1);
    assert!(output[0].contains("does not exist"), "{output:?}");
    assert!(fs.is_untouched());
}

#[test]
fn should_do_nothing_without_inputs() {
    let fixture = two_roots();
    let (code, output, fs) = fixture.run_main(&[]);
    assert_eq!(code, 0);
    assert!(output.is_empty());
    assert!(fs.is_untouched());
}
