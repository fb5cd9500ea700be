// Path Utilities
//
// Lexical path helpers shared by the planner and the rewriter. Nothing here
// touches the file system.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Normalize a path lexically, resolving `.` and `..` segments.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => result.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => result.push(".."),
            },
            Component::Normal(segment) => result.push(segment),
        }
    }
    result
}

/// Resolve `path` against `base` (when relative) and normalize the result.
pub fn absolute_from(base: &Path, path: &Path) -> PathBuf {
    normalize_path(&base.join(path))
}

/// Get the relative path from directory `from` to `to`.
///
/// Both paths must be absolute and normalized. Returns an empty path when they
/// are equal.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    let common_len = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common_len..from_parts.len() {
        result.push("..");
    }
    for part in &to_parts[common_len..] {
        result.push(part.as_os_str());
    }
    result
}

/// Join path segments with `/` regardless of host separator.
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Render a path as a string ending in exactly one separator.
pub fn with_trailing_separator(path: &Path) -> String {
    let mut s = path.to_string_lossy().into_owned();
    if !s.ends_with(MAIN_SEPARATOR) {
        s.push(MAIN_SEPARATOR);
    }
    s
}

/// Append a raw suffix to the last segment, `/a/foo` + `.ts` = `/a/foo.ts`.
pub fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(extension);
    PathBuf::from(s)
}

/// Check if a module specifier is relative.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Turn a relative path into a module specifier that can never be mistaken
/// for a bare package name.
pub fn to_module_specifier(relative: &Path) -> String {
    let specifier = to_forward_slashes(relative);
    if is_relative_specifier(&specifier) {
        specifier
    } else {
        format!("./{}", specifier)
    }
}
