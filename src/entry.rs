use std::fs;
use std::path::Path;

use crate::dir_path::DirPath;
use crate::entry_path::{EntryPath, RelPath};
use crate::error::{PathError, Result};
use crate::segment::{Filename, PathSegment};
use crate::status::{classify_file_type, EntryStatus};

/// A single item produced while walking a [`DirPath`].
///
/// Carries the walked root, the entry's path relative to that root (`"."`
/// for the root itself), and the file type captured during the directory
/// read. The file type is absent only for error paths where no handle could
/// be obtained. Entries are created fresh per yield and never mutated.
#[derive(Debug, Clone)]
pub struct WalkedEntry {
    root: DirPath,
    rel: RelPath,
    file_type: Option<fs::FileType>,
    depth: usize,
}

impl WalkedEntry {
    pub(crate) fn new(
        root: DirPath,
        rel: RelPath,
        file_type: Option<fs::FileType>,
        depth: usize,
    ) -> Self {
        Self {
            root,
            rel,
            file_type,
            depth,
        }
    }

    /// The root path the walk was started from, exactly as the caller gave it.
    pub fn root(&self) -> &DirPath {
        &self.root
    }

    /// The entry's path relative to [`root`](Self::root). `"."` for the root
    /// entry itself.
    pub fn rel(&self) -> &RelPath {
        &self.rel
    }

    /// The entry's full path: the root joined with the relative path.
    pub fn full_path(&self) -> EntryPath {
        if self.is_root() {
            EntryPath::new(self.root.as_path().to_path_buf())
        } else {
            EntryPath::new(self.root.as_path().join(self.rel.as_path()))
        }
    }

    /// The file type captured when the entry was read, if one was obtained.
    pub fn file_type(&self) -> Option<fs::FileType> {
        self.file_type
    }

    /// How deep in the traversal this entry was found. The root is 0, its
    /// children 1, and so on.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether this is the synthetic entry for the walk root itself.
    pub fn is_root(&self) -> bool {
        self.rel.as_path() == Path::new(".")
    }

    pub fn is_dir(&self) -> bool {
        self.file_type.is_some_and(|ft| ft.is_dir())
    }

    pub fn is_file(&self) -> bool {
        self.file_type.is_some_and(|ft| ft.is_file())
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type.is_some_and(|ft| ft.is_symlink())
    }

    /// Classify the entry from its captured file type, without another stat.
    /// `None` when no handle was obtained.
    pub fn entry_status(&self) -> Option<EntryStatus> {
        self.file_type.map(classify_file_type)
    }

    /// Fresh metadata for the entry (lstat semantics — the entry itself,
    /// not a symlink target).
    pub fn metadata(&self) -> Result<fs::Metadata> {
        let full = self.full_path();
        fs::symlink_metadata(full.as_path()).map_err(|source| PathError::Stat {
            path: full.as_path().to_path_buf(),
            source,
        })
    }

    /// The last element of the relative path.
    pub fn base(&self) -> EntryPath {
        match self.rel.as_path().file_name() {
            Some(name) => EntryPath::new(name),
            None => EntryPath::new("."),
        }
    }

    /// The entry's name as a [`PathSegment`].
    ///
    /// # Panics
    ///
    /// Panics when the entry is not a directory — calling this on a file is
    /// a programming error, not a runtime condition.
    pub fn path_segment(&self) -> PathSegment {
        assert!(
            self.is_dir(),
            "WalkedEntry::path_segment called on a non-directory entry"
        );
        PathSegment::new_unchecked(self.base().as_path().to_string_lossy())
    }

    /// The entry's name as a [`Filename`].
    ///
    /// # Panics
    ///
    /// Panics when the entry is not a regular file.
    pub fn filename(&self) -> Filename {
        assert!(
            self.is_file(),
            "WalkedEntry::filename called on a non-file entry"
        );
        Filename::new(self.base().as_path().to_string_lossy())
    }
}
