//! File System Abstraction
//!
//! The write side of the file system, as used by the directory materializer
//! and the emission orchestrator. Reads go straight to disk.

pub mod testing;

use std::fs;
use std::io;
use std::path::Path;

/// A basic interface to abstract the underlying file-system.
///
/// Implementations must be shareable across threads; directory creation is
/// fanned out in parallel.
pub trait FileSystem: Sync {
    /// Create `path` and every missing ancestor. Succeeds if it already exists.
    fn ensure_dir(&self, path: &Path) -> io::Result<()>;
    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// The real file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeJSFileSystem;

impl NodeJSFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for NodeJSFileSystem {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(path, data)
    }
}
