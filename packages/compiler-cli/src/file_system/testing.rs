use super::FileSystem;
use indexmap::IndexMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records every call instead of touching the disk.
///
/// Directory creation is recorded per call; file writes keep the last content
/// written to each path.
#[derive(Debug, Default)]
pub struct CapturingFileSystem {
    dirs: Mutex<Vec<PathBuf>>,
    files: Mutex<IndexMap<PathBuf, String>>,
}

impl CapturingFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories passed to `ensure_dir`, sorted (creation runs in parallel).
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = self.dirs.lock().map(|d| d.clone()).unwrap_or_default();
        dirs.sort();
        dirs
    }

    /// Files written, in write order.
    pub fn files(&self) -> IndexMap<PathBuf, String> {
        self.files.lock().map(|f| f.clone()).unwrap_or_default()
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .lock()
            .ok()
            .and_then(|f| f.get(path.as_ref()).cloned())
    }

    /// Whether any call at all reached this file system.
    pub fn is_untouched(&self) -> bool {
        self.created_dirs().is_empty() && self.files().is_empty()
    }
}

impl FileSystem for CapturingFileSystem {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        self.dirs
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "poisoned"))?
            .push(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let content = String::from_utf8_lossy(data).to_string();
        self.files
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "poisoned"))?
            .insert(path.to_path_buf(), content);
        Ok(())
    }
}
