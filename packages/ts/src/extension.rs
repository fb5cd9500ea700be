//! Source extension rules and emitted-output suffixes.

use std::path::Path;

/// Recognized source extensions, in the order module specifiers are probed.
///
/// Declaration forms come after their implementation forms so that a `.ts`
/// file shadows a `.d.ts` of the same stem.
pub const SOURCE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".mts", ".cts", ".d.ts", ".d.mts", ".d.cts"];

const DECLARATION_EXTENSIONS: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

/// Whether the path names a file with a recognized source extension.
pub fn has_source_extension(path: &Path) -> bool {
    let name = file_name(path);
    SOURCE_EXTENSIONS
        .iter()
        .any(|ext| name.len() > ext.len() && name.ends_with(ext))
}

/// Check if file is a declaration file.
pub fn is_declaration_file(path: &Path) -> bool {
    let name = file_name(path);
    DECLARATION_EXTENSIONS
        .iter()
        .any(|ext| name.len() > ext.len() && name.ends_with(ext))
}

/// Remove the longest matching source extension, `foo.d.ts` becomes `foo`.
pub fn strip_source_extension(name: &str) -> &str {
    SOURCE_EXTENSIONS
        .iter()
        .filter(|ext| name.len() > ext.len() && name.ends_with(*ext))
        .map(|ext| &name[..name.len() - ext.len()])
        .min_by_key(|stem| stem.len())
        .unwrap_or(name)
}

/// The categories of artifact the engine emits for one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Script,
    ScriptMap,
    Declaration,
    DeclarationMap,
}

impl OutputKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            OutputKind::Script => ".js",
            OutputKind::ScriptMap => ".js.map",
            OutputKind::Declaration => ".d.ts",
            OutputKind::DeclarationMap => ".d.ts.map",
        }
    }

    pub fn is_source_map(&self) -> bool {
        matches!(self, OutputKind::ScriptMap | OutputKind::DeclarationMap)
    }

    /// Classify an emitted file name by its suffix, longest suffix first.
    pub fn from_file_name(name: &str) -> Option<OutputKind> {
        [
            OutputKind::DeclarationMap,
            OutputKind::ScriptMap,
            OutputKind::Declaration,
            OutputKind::Script,
        ]
        .into_iter()
        .find(|kind| name.ends_with(kind.suffix()))
    }
}
