use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::entry_path::EntryPath;
use crate::error::{PathError, Result};
use crate::expand::{absolutize, clean};
use crate::segment::VolumeName;
use crate::status::{classify, EntryStatus};

/// A value that can be viewed as a filesystem path.
///
/// This is the one capability every path type shares. The richer traits
/// ([`Classify`], [`PathOps`]) build on it, so shared behavior like entry
/// classification is written once here instead of per concrete type.
pub trait PathLike {
    fn as_path(&self) -> &Path;
}

/// Classification operations for anything path-like.
///
/// Blanket-implemented: every [`PathLike`] type can be classified. A missing
/// entry is reported as [`EntryStatus::Missing`] with no error — callers
/// must distinguish absence (a normal outcome) from an actual stat failure
/// (`Err`).
///
/// # Example
///
/// ```
/// use pathkind::{Classify, DirPath, EntryStatus};
///
/// let dir = tempfile::tempdir().unwrap();
/// let missing = DirPath::new(dir.path().join("nope"));
/// assert_eq!(missing.status().unwrap(), EntryStatus::Missing);
/// ```
pub trait Classify: PathLike {
    /// Classify the entry, following symlinks (stat semantics).
    fn status(&self) -> Result<EntryStatus> {
        classify(self.as_path(), true)
    }

    /// Classify the entry itself, not its target (lstat semantics).
    /// This is the only way to observe [`EntryStatus::Symlink`].
    fn symlink_status(&self) -> Result<EntryStatus> {
        classify(self.as_path(), false)
    }

    /// Full metadata for the entry, following symlinks.
    fn metadata(&self) -> Result<fs::Metadata> {
        fs::metadata(self.as_path()).map_err(|source| PathError::Stat {
            path: self.as_path().to_path_buf(),
            source,
        })
    }

    /// The target of the symlink at this path.
    ///
    /// The returned target is as stored in the link: usually relative to the
    /// link's containing directory, not absolute.
    fn read_link(&self) -> Result<EntryPath> {
        let target = fs::read_link(self.as_path()).map_err(|source| PathError::Io {
            path: self.as_path().to_path_buf(),
            source,
        })?;
        Ok(EntryPath::from_path(target))
    }
}

impl<T: PathLike + ?Sized> Classify for T {}

/// Joining, cleaning, and absolutizing for path types.
///
/// Concrete types provide the [`from_path`](PathOps::from_path) constructor
/// hook; everything else is written once here. Each operation returns the
/// implementing type, so `DirPath::join` yields a `DirPath` and
/// `FilePath::clean` a `FilePath`.
pub trait PathOps: PathLike + Sized {
    /// Wrap an already-formed path. No validation — parsing constructors on
    /// the concrete types are the validated entry points.
    fn from_path(path: PathBuf) -> Self;

    /// Join `part` onto this path. Standard-library semantics: an absolute
    /// `part` replaces the path entirely.
    fn join<P: AsRef<Path>>(&self, part: P) -> Self {
        Self::from_path(self.as_path().join(part))
    }

    /// Lexically clean the path: collapse `.`, resolve `..` against prior
    /// components, drop redundant separators. No filesystem access.
    fn clean(&self) -> Self {
        Self::from_path(clean(self.as_path()))
    }

    fn is_abs(&self) -> bool {
        self.as_path().is_absolute()
    }

    /// Make the path absolute against the current working directory and
    /// clean it.
    fn to_abs(&self) -> Result<Self> {
        Ok(Self::from_path(absolutize(self.as_path())?))
    }

    /// Resolve all symlinks in the path. Requires the path to exist.
    fn canonicalize(&self) -> Result<Self> {
        let resolved = fs::canonicalize(self.as_path()).map_err(|source| PathError::Io {
            path: self.as_path().to_path_buf(),
            source,
        })?;
        Ok(Self::from_path(resolved))
    }

    /// Substring check over the textual form of the path.
    fn contains<S: AsRef<str>>(&self, needle: S) -> bool {
        self.as_path()
            .to_string_lossy()
            .contains(needle.as_ref())
    }

    fn has_prefix<S: AsRef<str>>(&self, prefix: S) -> bool {
        self.as_path()
            .to_string_lossy()
            .starts_with(prefix.as_ref())
    }

    fn has_suffix<S: AsRef<str>>(&self, suffix: S) -> bool {
        self.as_path().to_string_lossy().ends_with(suffix.as_ref())
    }

    /// Whether the path, interpreted as relative, starts with a `..`
    /// component. `..foo` is a normal name and does not count.
    fn has_dotdot_prefix(&self) -> bool {
        matches!(
            self.as_path().components().next(),
            Some(std::path::Component::ParentDir)
        )
    }

    /// Return the path with exactly one trailing platform separator.
    /// An empty path is returned unchanged.
    fn ensure_trailing_sep(&self) -> Self {
        let text = self.as_path().to_string_lossy();
        if text.is_empty() || text.ends_with(MAIN_SEPARATOR) {
            return Self::from_path(self.as_path().to_path_buf());
        }
        // On Windows a trailing forward slash already separates; swap it for
        // the native one.
        if cfg!(windows) && text.ends_with('/') {
            let swapped = format!("{}{}", &text[..text.len() - 1], MAIN_SEPARATOR_STR);
            return Self::from_path(PathBuf::from(swapped));
        }
        let mut os = self.as_path().as_os_str().to_os_string();
        os.push(MAIN_SEPARATOR_STR);
        Self::from_path(PathBuf::from(os))
    }

    /// The Windows volume prefix (`C:`, `\\server\share`). Empty on other
    /// platforms and on plain relative paths.
    fn volume_name(&self) -> VolumeName {
        match self.as_path().components().next() {
            Some(std::path::Component::Prefix(prefix)) => {
                VolumeName::new(prefix.as_os_str().to_string_lossy())
            }
            _ => VolumeName::new(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir_path::DirPath;

    #[test]
    fn join_and_clean_compose() {
        let dp = DirPath::new("/a/b");
        assert_eq!(dp.join("../c").clean().as_path(), Path::new("/a/c"));
    }

    #[test]
    fn dotdot_prefix_only_matches_a_real_component() {
        assert!(DirPath::new("..").has_dotdot_prefix());
        assert!(DirPath::new("../x").has_dotdot_prefix());
        assert!(!DirPath::new("..foo").has_dotdot_prefix());
        assert!(!DirPath::new("a/..").has_dotdot_prefix());
    }

    #[cfg(not(windows))]
    #[test]
    fn trailing_separator_is_added_once() {
        let dp = DirPath::new("/a/b");
        assert_eq!(dp.ensure_trailing_sep().as_path(), Path::new("/a/b/"));
        assert_eq!(
            dp.ensure_trailing_sep().ensure_trailing_sep().as_path(),
            Path::new("/a/b/")
        );
    }

    #[test]
    fn textual_containment() {
        let dp = DirPath::new("/var/log/app");
        assert!(dp.contains("log"));
        assert!(dp.has_prefix("/var"));
        assert!(dp.has_suffix("app"));
    }
}
