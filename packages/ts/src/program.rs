use std::path::PathBuf;

/// The subset of compiler options the orchestrator and the engine agree on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Global output directory every input root is re-rooted under.
    pub out_dir: Option<PathBuf>,
    /// Emit `.d.ts` files.
    pub declaration: bool,
    /// Emit `.d.ts.map` files. Ignored unless `declaration` is set.
    pub declaration_map: bool,
    /// Emit `.js.map` files.
    pub source_map: bool,
}

impl CompilerOptions {
    pub fn emits_declaration_map(&self) -> bool {
        self.declaration && self.declaration_map
    }
}
