// Path Map Table
//
// Ordered prefix rewrites consulted by the import rewriter when a relative
// specifier points outside the compiled set.

use crate::error::ConfigError;
use crate::util::absolute_from;
use std::path::{Path, PathBuf};

/// One `from[:to]` rewrite. Both prefixes are absolute and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapEntry {
    pub from_prefix: PathBuf,
    pub to_prefix: PathBuf,
}

impl PathMapEntry {
    /// Parse a `from[:to]` option value, resolving both sides against `cwd`.
    /// `to` defaults to `from`.
    pub fn parse(value: &str, cwd: &Path) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = value.split(':').collect();
        let (from, to) = match parts.as_slice() {
            [from] => (*from, *from),
            [from, to] => (*from, *to),
            _ => return Err(ConfigError::InvalidPathMap(value.to_string())),
        };
        if from.is_empty() || to.is_empty() {
            return Err(ConfigError::InvalidPathMap(value.to_string()));
        }
        Ok(PathMapEntry {
            from_prefix: absolute_from(cwd, Path::new(from)),
            to_prefix: absolute_from(cwd, Path::new(to)),
        })
    }
}

/// Entries sorted by descending `from_prefix`, so that the longest applicable
/// prefix is tried first. First match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapTable {
    entries: Vec<PathMapEntry>,
}

impl PathMapTable {
    pub fn new(mut entries: Vec<PathMapEntry>) -> Self {
        entries.sort_by(|a, b| b.from_prefix.as_os_str().cmp(a.from_prefix.as_os_str()));
        PathMapTable { entries }
    }

    pub fn parse<S: AsRef<str>>(values: &[S], cwd: &Path) -> Result<Self, ConfigError> {
        let entries = values
            .iter()
            .map(|value| PathMapEntry::parse(value.as_ref(), cwd))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[PathMapEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Splice `path` onto the `to_prefix` of the first entry whose
    /// `from_prefix` is a segment-aligned prefix of it.
    pub fn map(&self, path: &Path) -> Option<PathBuf> {
        self.entries.iter().find_map(|entry| {
            path.strip_prefix(&entry.from_prefix)
                .ok()
                .map(|rest| entry.to_prefix.join(rest))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cwd() -> PathBuf {
        PathBuf::from("/work")
    }

    #[test]
    fn test_parse_defaults_to_from() {
        let entry = PathMapEntry::parse("vendor", &cwd()).unwrap();
        assert_eq!(entry.from_prefix, PathBuf::from("/work/vendor"));
        assert_eq!(entry.to_prefix, PathBuf::from("/work/vendor"));
    }

    #[test]
    fn test_parse_resolves_both_sides() {
        let entry = PathMapEntry::parse("./vendor/:/dist/vendor", &cwd()).unwrap();
        assert_eq!(entry.from_prefix, PathBuf::from("/work/vendor"));
        assert_eq!(entry.to_prefix, PathBuf::from("/dist/vendor"));
    }

    #[test]
    fn test_parse_rejects_more_than_one_colon() {
        let err = PathMapEntry::parse("a:b:c", &cwd()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPathMap(v) if v == "a:b:c"));
    }

    #[test]
    fn test_parse_rejects_empty_sides() {
        assert!(PathMapEntry::parse(":b", &cwd()).is_err());
        assert!(PathMapEntry::parse("a:", &cwd()).is_err());
    }

    #[test]
    fn test_table_sorted_descending() {
        let table = PathMapTable::parse(&["/a:/x", "/a/b/c:/z", "/a/b:/y"], &cwd()).unwrap();
        let froms: Vec<_> = table.entries().iter().map(|e| e.from_prefix.clone()).collect();
        assert_eq!(
            froms,
            vec![
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
                PathBuf::from("/a")
            ]
        );
    }

    #[test]
    fn test_map_prefers_longest_prefix() {
        let table = PathMapTable::parse(&["/a:/x", "/a/b:/y"], &cwd()).unwrap();
        assert_eq!(table.map(Path::new("/a/b/c")), Some(PathBuf::from("/y/c")));
        assert_eq!(table.map(Path::new("/a/c")), Some(PathBuf::from("/x/c")));
    }

    #[test]
    fn test_map_is_segment_aligned() {
        let table = PathMapTable::parse(&["/a/b:/y"], &cwd()).unwrap();
        assert_eq!(table.map(Path::new("/a/bc/d")), None);
        assert_eq!(table.map(Path::new("/a/b")), Some(PathBuf::from("/y")));
    }
}
