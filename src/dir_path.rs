use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::entry::WalkedEntry;
use crate::entry_path::RelPath;
use crate::error::{PathError, Result};
use crate::expand::{clean, home_dir, relative_to, TildePath};
use crate::segment::PathSegment;
use crate::segments::PathSegments;
use crate::status::EntryStatus;
use crate::traits::{Classify, PathLike, PathOps};
use crate::walk::{WalkDirs, WalkFiles, Walker};

/// An absolute or relative directory path.
///
/// A `DirPath` says what the path is *for* — it does not promise the
/// directory exists. Syntactic invariants are checked by
/// [`parse`](DirPath::parse); [`new`](DirPath::new) wraps any path verbatim.
///
/// # Example
///
/// ```
/// use pathkind::{Classify, DirPath, EntryStatus};
///
/// let temp = tempfile::tempdir().unwrap();
/// let dp = DirPath::new(temp.path());
/// assert_eq!(dp.status().unwrap(), EntryStatus::Directory);
/// assert!(dp.exists().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirPath(PathBuf);

impl DirPath {
    /// Wrap a path verbatim, no validation.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self(path.into())
    }

    /// Parse a directory path from a string, expanding valid tilde syntax.
    ///
    /// `~` followed by a separator (or alone) resolves against the home
    /// directory; `~foo` and everything else is taken literally.
    ///
    /// # Errors
    ///
    /// [`PathError::Empty`] for empty input; home-resolution errors when
    /// tilde syntax is present but the home directory is unavailable.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        if input.starts_with('~') {
            match TildePath::parse(input) {
                Ok(tilde) => return tilde.expand(),
                Err(PathError::NotTilde(_)) => {} // a literal name like "~foo"
                Err(e) => return Err(e),
            }
        }
        Ok(Self(PathBuf::from(input)))
    }

    /// Parse several directory paths, keeping the ones that parse and
    /// collecting the errors alongside them.
    pub fn parse_all<I, S>(inputs: I) -> (Vec<Self>, Vec<PathError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        let mut errors = Vec::new();
        for input in inputs {
            match Self::parse(input.as_ref()) {
                Ok(dp) => parsed.push(dp),
                Err(e) => errors.push(e),
            }
        }
        (parsed, errors)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// The parent directory (lexical, like `Path::parent`); the path itself
    /// when it has no parent.
    pub fn parent(&self) -> DirPath {
        match self.0.parent() {
            Some(p) if !p.as_os_str().is_empty() => DirPath::new(p),
            _ => self.clone(),
        }
    }

    /// The last path element.
    pub fn base(&self) -> PathSegment {
        match self.0.file_name() {
            Some(name) => PathSegment::new_unchecked(name.to_string_lossy()),
            None => PathSegment::new_unchecked("."),
        }
    }

    // ── Filesystem operations ─────────────────────────────────────────────

    /// Verify the directory exists, creating it and any missing parents as
    /// needed. A no-op when the directory already exists.
    ///
    /// # Errors
    ///
    /// [`PathError::PathIsFile`] when a regular file occupies the path;
    /// [`PathError::UnsupportedEntry`] for any other non-directory entry.
    pub fn ensure_exists(&self) -> Result<()> {
        match self.status()? {
            EntryStatus::Directory => Ok(()),
            EntryStatus::Missing => {
                debug!("creating directory {:?}", self.0);
                self.create_dir_all()
            }
            EntryStatus::File => Err(PathError::PathIsFile(self.0.clone())),
            status => Err(PathError::UnsupportedEntry {
                path: self.0.clone(),
                status,
            }),
        }
    }

    /// Create the directory and all missing parents.
    pub fn create_dir_all(&self) -> Result<()> {
        fs::create_dir_all(&self.0).map_err(|source| PathError::Io {
            path: self.0.clone(),
            source,
        })
    }

    /// Remove the directory and everything below it.
    pub fn remove_all(&self) -> Result<()> {
        fs::remove_dir_all(&self.0).map_err(|source| PathError::Io {
            path: self.0.clone(),
            source,
        })
    }

    pub fn set_permissions(&self, perm: fs::Permissions) -> Result<()> {
        fs::set_permissions(&self.0, perm).map_err(|source| PathError::Io {
            path: self.0.clone(),
            source,
        })
    }

    /// Read the directory's immediate children as [`WalkedEntry`] values
    /// whose relative paths are the child names.
    pub fn read_dir(&self) -> Result<Vec<WalkedEntry>> {
        let handle = fs::read_dir(&self.0).map_err(|source| PathError::ReadDir {
            path: self.0.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for child in handle {
            let child = child.map_err(|source| PathError::ReadDir {
                path: self.0.clone(),
                source,
            })?;
            let file_type = child.file_type().map_err(|source| PathError::Stat {
                path: child.path(),
                source,
            })?;
            entries.push(WalkedEntry::new(
                self.clone(),
                RelPath::new(child.file_name()),
                Some(file_type),
                1,
            ));
        }
        Ok(entries)
    }

    /// Whether a directory exists at this path. A missing entry or an entry
    /// of another kind (such as a regular file) reports `false`.
    pub fn exists(&self) -> Result<bool> {
        Ok(self.status()?.is_dir())
    }

    /// Whether something writable governs this path. See [`crate::can_write`].
    pub fn can_write(&self) -> Result<bool> {
        crate::util::can_write(&self.0)
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Walk the tree below this directory, the root itself excluded.
    /// See [`Walker`] for ordering, laziness, and error semantics.
    pub fn walk(&self) -> Walker {
        Walker::new(self.clone())
    }

    /// Walk the tree, first yielding a synthetic entry for the root itself
    /// (relative path `"."`, the root's own lstat file type).
    pub fn walk_with_root(&self) -> Walker {
        Walker::with_root_entry(self.clone())
    }

    /// Files-only view of [`walk`](Self::walk).
    pub fn walk_files(&self) -> WalkFiles {
        self.walk().files()
    }

    /// Directories-only view of [`walk`](Self::walk).
    pub fn walk_dirs(&self) -> WalkDirs {
        self.walk().dirs()
    }

    // ── Expansion ─────────────────────────────────────────────────────────

    /// Expand the path per [`crate::expand`]: `.`, `~`, tilde remainders,
    /// and plain relative paths all become absolute.
    pub fn expand(&self) -> Result<DirPath> {
        let text = self
            .0
            .to_str()
            .ok_or_else(|| PathError::NonUtf8(self.0.clone()))?;
        let expanded = crate::expand::expand(text)?;
        Ok(DirPath::new(expanded.as_path()))
    }

    /// Expand a leading tilde when present, otherwise absolutize. The result
    /// is always an absolute, cleaned directory path.
    pub fn normalize(&self) -> Result<DirPath> {
        let text = self
            .0
            .to_str()
            .ok_or_else(|| PathError::NonUtf8(self.0.clone()))?;
        match TildePath::parse(text) {
            Ok(tilde) => tilde.expand(),
            Err(PathError::Empty) => Err(PathError::Empty),
            Err(_) => self.to_abs(),
        }
    }

    /// Rewrite the path as a tilde path relative to the home directory.
    /// Round-trips with [`TildePath::expand`] for paths under home.
    pub fn to_tilde(&self) -> Result<TildePath> {
        let home = home_dir()?;
        let rel = relative_to(&self.0, &home)?;
        Ok(TildePath::new_unchecked(clean(&Path::new("~").join(rel))))
    }

    /// The path of this directory relative to `base`, as joinable segments.
    pub fn rel_to(&self, base: &DirPath) -> Result<PathSegments> {
        let rel = relative_to(&self.0, &base.0)?;
        let text = rel
            .to_str()
            .ok_or_else(|| PathError::NonUtf8(rel.clone()))?;
        Ok(PathSegments::new(text))
    }
}

impl PathLike for DirPath {
    fn as_path(&self) -> &Path {
        &self.0
    }
}

impl PathOps for DirPath {
    fn from_path(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for DirPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl AsRef<Path> for DirPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for DirPath {
    fn from(s: &str) -> Self {
        Self(PathBuf::from(s))
    }
}

impl From<String> for DirPath {
    fn from(s: String) -> Self {
        Self(PathBuf::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_and_expands_tilde() {
        assert!(matches!(DirPath::parse(""), Err(PathError::Empty)));

        let home = home::home_dir().unwrap();
        assert_eq!(DirPath::parse("~").unwrap().as_path(), home.as_path());
        assert_eq!(
            DirPath::parse("~/x").unwrap().as_path(),
            home.join("x").as_path()
        );
        // Literal names keep their tilde.
        assert_eq!(DirPath::parse("~foo").unwrap().as_path(), Path::new("~foo"));
        assert_eq!(DirPath::parse("/tmp").unwrap().as_path(), Path::new("/tmp"));
    }

    #[test]
    fn ensure_exists_creates_missing_directories() {
        let temp = tempfile::tempdir().unwrap();
        let dp = DirPath::new(temp.path().join("a/b/c"));

        assert!(!dp.exists().unwrap());
        dp.ensure_exists().unwrap();
        assert!(dp.exists().unwrap());
        // Second call is a no-op.
        dp.ensure_exists().unwrap();
    }

    #[test]
    fn ensure_exists_rejects_a_file_in_the_way() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();

        let err = DirPath::new(&file).ensure_exists().unwrap_err();
        assert!(matches!(err, PathError::PathIsFile(_)));
    }

    #[test]
    fn exists_is_directory_specific() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("f");
        std::fs::write(&file, b"x").unwrap();

        assert!(DirPath::new(temp.path()).exists().unwrap());
        assert!(!DirPath::new(&file).exists().unwrap());
        assert!(!DirPath::new(temp.path().join("gone")).exists().unwrap());
    }

    #[test]
    fn read_dir_returns_typed_children() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("f.txt"), b"x").unwrap();
        std::fs::create_dir(temp.path().join("d")).unwrap();

        let mut names: Vec<String> = DirPath::new(temp.path())
            .read_dir()
            .unwrap()
            .iter()
            .map(|e| e.rel().as_path().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["d", "f.txt"]);
    }

    #[test]
    fn tilde_round_trip() {
        let home = home::home_dir().unwrap();
        let dp = DirPath::new(home.join("projects/demo"));

        let tilde = dp.to_tilde().unwrap();
        assert_eq!(tilde.as_path(), Path::new("~/projects/demo"));
        assert_eq!(tilde.expand().unwrap().as_path(), dp.as_path());
    }

    #[test]
    fn to_tilde_of_home_itself() {
        let home = home::home_dir().unwrap();
        let tilde = DirPath::new(&home).to_tilde().unwrap();
        assert_eq!(tilde.as_path(), Path::new("~"));
        assert_eq!(tilde.expand().unwrap().as_path(), home.as_path());
    }

    #[test]
    fn rel_to_produces_segments() {
        let a = DirPath::new("/a/b/c/d");
        let base = DirPath::new("/a/b");
        let segments = a.rel_to(&base).unwrap();
        assert_eq!(segments.as_str(), "c/d");
    }

    #[test]
    fn parent_and_base() {
        let dp = DirPath::new("/a/b/c");
        assert_eq!(dp.parent().as_path(), Path::new("/a/b"));
        assert_eq!(dp.base().as_str(), "c");
    }

    #[test]
    fn parse_all_collects_errors_without_dropping_good_input() {
        let (parsed, errors) = DirPath::parse_all(["/a", "", "/b"]);
        assert_eq!(parsed.len(), 2);
        assert_eq!(errors.len(), 1);
    }
}
