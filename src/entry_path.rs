use std::fmt;
use std::path::{Path, PathBuf};

use crate::dir_path::DirPath;
use crate::error::{PathError, Result};
use crate::segment::PathSegment;
use crate::traits::{PathLike, PathOps};

/// A path to a filesystem entry of unknown kind — it may name a file or a
/// directory. Used where an operation is agnostic to which, such as
/// classification or expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPath(PathBuf);

impl EntryPath {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self(path.into())
    }

    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(PathBuf::from(input)))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// The containing directory.
    pub fn parent(&self) -> DirPath {
        match self.0.parent() {
            Some(p) if !p.as_os_str().is_empty() => DirPath::new(p),
            _ => DirPath::new("."),
        }
    }

    /// The last path element.
    pub fn base(&self) -> PathSegment {
        match self.0.file_name() {
            Some(name) => PathSegment::new_unchecked(name.to_string_lossy()),
            None => PathSegment::new_unchecked("."),
        }
    }

    /// Expand the path per [`crate::expand`].
    pub fn expand(&self) -> Result<EntryPath> {
        let text = self
            .0
            .to_str()
            .ok_or_else(|| PathError::NonUtf8(self.0.clone()))?;
        crate::expand::expand(text)
    }
}

impl PathLike for EntryPath {
    fn as_path(&self) -> &Path {
        &self.0
    }
}

impl PathOps for EntryPath {
    fn from_path(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl AsRef<Path> for EntryPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for EntryPath {
    fn from(s: &str) -> Self {
        Self(PathBuf::from(s))
    }
}

impl From<DirPath> for EntryPath {
    fn from(dp: DirPath) -> Self {
        Self(dp.as_path().to_path_buf())
    }
}

/// A path known to be relative — a walk result, or the output of
/// a rel-to computation. Never begins at a filesystem root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelPath(PathBuf);

impl RelPath {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn parent(&self) -> DirPath {
        match self.0.parent() {
            Some(p) if !p.as_os_str().is_empty() => DirPath::new(p),
            _ => DirPath::new("."),
        }
    }

    pub fn base(&self) -> PathSegment {
        match self.0.file_name() {
            Some(name) => PathSegment::new_unchecked(name.to_string_lossy()),
            None => PathSegment::new_unchecked("."),
        }
    }
}

impl PathLike for RelPath {
    fn as_path(&self) -> &Path {
        &self.0
    }
}

impl PathOps for RelPath {
    fn from_path(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl AsRef<Path> for RelPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelPath {
    fn from(s: &str) -> Self {
        Self(PathBuf::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_and_base_of_entry_path() {
        let ep = EntryPath::new("/a/b/c.txt");
        assert_eq!(ep.parent().as_path(), Path::new("/a/b"));
        assert_eq!(ep.base().as_str(), "c.txt");
    }

    #[test]
    fn bare_name_has_dot_parent() {
        assert_eq!(EntryPath::new("x").parent().as_path(), Path::new("."));
        assert_eq!(RelPath::new("x").parent().as_path(), Path::new("."));
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(EntryPath::parse(""), Err(PathError::Empty)));
    }
}
