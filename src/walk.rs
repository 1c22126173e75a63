//! Depth-first, lazily-produced directory traversal.
//!
//! [`Walker`] iterates a directory tree with an explicit stack of directory
//! frames, so traversal depth is bounded by memory rather than the call
//! stack and the iterator can suspend cleanly between any two yields. Each
//! directory is read exactly once, only when traversal reaches it; once the
//! consumer stops pulling, no further directory reads occur.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::dir_path::DirPath;
use crate::entry::WalkedEntry;
use crate::entry_path::RelPath;
use crate::error::{PathError, Result};

// ---------------------------------------------------------------------------
// FlowControl
// ---------------------------------------------------------------------------

/// Directive returned by a [`Walker::for_each_entry`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
    /// Keep walking.
    Continue,

    /// Do not descend into the directory just visited. Meaningful only when
    /// the current item is a directory; otherwise equivalent to `Continue`.
    SkipSubtree,

    /// Terminate the walk immediately.
    Stop,
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

/// One directory's traversal state: its root-relative path and its lazily
/// opened read handle.
struct DirFrame {
    /// Path relative to the walk root; `"."` for the root frame.
    rel: PathBuf,
    /// Opened on first touch, exactly once per directory. Holding the live
    /// handle keeps open state bounded to the root-to-active-frame path.
    handle: Option<fs::ReadDir>,
}

impl DirFrame {
    fn unread(rel: PathBuf) -> Self {
        Self { rel, handle: None }
    }
}

/// Depth-first, pre-order iterator over the entries below a [`DirPath`].
///
/// Yields `Result<WalkedEntry, PathError>`. A failed directory read is
/// yielded as an `Err` carrying that directory's root-relative path, and the
/// walk then continues with siblings — a per-entry error never aborts the
/// traversal; only the consumer decides what is fatal.
///
/// Within one directory, children appear in the order the operating system
/// returns them; no sorting is applied and no ordering holds across
/// directories beyond directory-before-descendants.
///
/// Created by [`DirPath::walk`] (root excluded) or [`DirPath::walk_with_root`]
/// (a synthetic entry for the root, rel `"."`, is yielded first).
///
/// # Example
///
/// ```
/// use pathkind::DirPath;
/// use std::fs;
///
/// let temp = tempfile::tempdir().unwrap();
/// fs::create_dir(temp.path().join("sub")).unwrap();
/// fs::write(temp.path().join("sub/inner.txt"), b"x").unwrap();
///
/// let root = DirPath::new(temp.path());
/// let mut rels: Vec<_> = root
///     .walk()
///     .filter_map(|item| item.ok())
///     .map(|entry| entry.rel().as_path().to_path_buf())
///     .collect();
/// rels.sort();
/// assert_eq!(rels, vec!["sub".into(), std::path::PathBuf::from("sub/inner.txt")]);
/// ```
pub struct Walker {
    root: DirPath,
    start: PathBuf,
    /// Set while the synthetic root entry of `walk_with_root` is still owed.
    pending_root: bool,
    stack: Vec<DirFrame>,
    /// Whether the most recent yield pushed a frame — the target of
    /// [`skip_current_dir`](Self::skip_current_dir).
    descended: bool,
}

impl Walker {
    /// Traversal of the entries below `root`, the root itself excluded.
    pub(crate) fn new(root: DirPath) -> Self {
        let start = root.as_path().to_path_buf();
        Self {
            root,
            start,
            pending_root: false,
            stack: vec![DirFrame::unread(PathBuf::from("."))],
            descended: false,
        }
    }

    /// Traversal that first yields a synthetic entry for the root itself.
    pub(crate) fn with_root_entry(root: DirPath) -> Self {
        let start = root.as_path().to_path_buf();
        Self {
            root,
            start,
            pending_root: true,
            stack: Vec::new(),
            descended: false,
        }
    }

    /// Prune descent into the directory yielded by the most recent call to
    /// `next`. Effective only between that yield and the next pull, and only
    /// when the yielded entry was a directory; otherwise a no-op.
    pub fn skip_current_dir(&mut self) {
        if self.descended {
            self.stack.pop();
            self.descended = false;
        }
    }

    /// Number of directory handles currently held open. Always bounded by
    /// the depth of the path from the root to the active frame, never by the
    /// size of the tree. Exposed for diagnostics and resource assertions.
    pub fn open_dirs(&self) -> usize {
        self.stack.iter().filter(|f| f.handle.is_some()).count()
    }

    /// Drive the walk with a callback instead of pulling items.
    ///
    /// The callback's [`FlowControl`] return steers traversal:
    /// [`Continue`](FlowControl::Continue) proceeds,
    /// [`SkipSubtree`](FlowControl::SkipSubtree) prunes the directory just
    /// visited, [`Stop`](FlowControl::Stop) ends the walk.
    pub fn for_each_entry<F>(mut self, mut visit: F)
    where
        F: FnMut(Result<WalkedEntry>) -> FlowControl,
    {
        while let Some(item) = self.next() {
            match visit(item) {
                FlowControl::Continue => {}
                FlowControl::SkipSubtree => self.skip_current_dir(),
                FlowControl::Stop => break,
            }
        }
    }

    /// Keep only regular files. A pure filter over the same traversal:
    /// ordering, laziness, and error pass-through are unchanged.
    pub fn files(self) -> WalkFiles {
        WalkFiles { inner: self }
    }

    /// Keep only directories. A pure filter over the same traversal.
    pub fn dirs(self) -> WalkDirs {
        WalkDirs { inner: self }
    }

    fn yield_root(&mut self) -> Result<WalkedEntry> {
        match fs::symlink_metadata(&self.start) {
            Ok(meta) => {
                if meta.is_dir() {
                    self.stack.push(DirFrame::unread(PathBuf::from(".")));
                    self.descended = true;
                }
                Ok(WalkedEntry::new(
                    self.root.clone(),
                    RelPath::new("."),
                    Some(meta.file_type()),
                    0,
                ))
            }
            Err(source) => Err(PathError::Stat {
                path: self.start.clone(),
                source,
            }),
        }
    }
}

impl Iterator for Walker {
    type Item = Result<WalkedEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending_root {
            self.pending_root = false;
            return Some(self.yield_root());
        }

        self.descended = false;

        loop {
            // Open the top frame's directory if traversal just reached it.
            // A failed read is yielded with the directory's relative path
            // and the frame popped; siblings and parents continue.
            let read_failure = match self.stack.last_mut() {
                None => return None,
                Some(frame) => {
                    if frame.handle.is_none() {
                        let dir = if frame.rel == Path::new(".") {
                            self.start.clone()
                        } else {
                            self.start.join(&frame.rel)
                        };
                        debug!("reading directory {:?}", dir);
                        match fs::read_dir(&dir) {
                            Ok(handle) => {
                                frame.handle = Some(handle);
                                None
                            }
                            Err(source) => Some(source),
                        }
                    } else {
                        None
                    }
                }
            };
            if let Some(source) = read_failure {
                if let Some(frame) = self.stack.pop() {
                    return Some(Err(PathError::ReadDir {
                        path: frame.rel,
                        source,
                    }));
                }
                return None;
            }

            let frame = self.stack.last_mut()?;
            match frame.handle.as_mut().and_then(Iterator::next) {
                // Frame exhausted: ascend to the parent.
                None => {
                    self.stack.pop();
                }
                // The read failed partway through; surface it for this
                // directory and abandon the rest of the frame.
                Some(Err(source)) => {
                    let rel = frame.rel.clone();
                    self.stack.pop();
                    return Some(Err(PathError::ReadDir { path: rel, source }));
                }
                Some(Ok(child)) => {
                    let rel = if frame.rel == Path::new(".") {
                        PathBuf::from(child.file_name())
                    } else {
                        frame.rel.join(child.file_name())
                    };
                    let depth = self.stack.len();

                    let file_type = match child.file_type() {
                        Ok(ft) => ft,
                        Err(source) => {
                            return Some(Err(PathError::Stat { path: rel, source }));
                        }
                    };

                    // Pre-order: push the directory's (unread) frame now so
                    // it is visited next, unless the consumer skips it.
                    if file_type.is_dir() {
                        self.stack.push(DirFrame::unread(rel.clone()));
                        self.descended = true;
                    }

                    return Some(Ok(WalkedEntry::new(
                        self.root.clone(),
                        RelPath::new(rel),
                        Some(file_type),
                        depth,
                    )));
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered views
// ---------------------------------------------------------------------------

/// Files-only view over a [`Walker`]. See [`Walker::files`].
pub struct WalkFiles {
    inner: Walker,
}

impl Iterator for WalkFiles {
    type Item = Result<WalkedEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.inner.by_ref() {
            match item {
                Err(e) => return Some(Err(e)),
                Ok(entry) if entry.is_file() => return Some(Ok(entry)),
                Ok(_) => {}
            }
        }
        None
    }
}

/// Directories-only view over a [`Walker`]. See [`Walker::dirs`].
pub struct WalkDirs {
    inner: Walker,
}

impl Iterator for WalkDirs {
    type Item = Result<WalkedEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.inner.by_ref() {
            match item {
                Err(e) => return Some(Err(e)),
                Ok(entry) if entry.is_dir() => return Some(Ok(entry)),
                Ok(_) => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;

    fn rel_set<I: Iterator<Item = Result<WalkedEntry>>>(iter: I) -> BTreeSet<PathBuf> {
        iter.map(|item| item.expect("walk entry"))
            .map(|entry| entry.rel().as_path().to_path_buf())
            .collect()
    }

    fn build_tree(root: &Path) {
        fs::write(root.join("file1.txt"), b"one").unwrap();
        fs::create_dir_all(root.join("sub/nested")).unwrap();
        fs::write(root.join("sub/nested/file2.txt"), b"two").unwrap();
    }

    #[test]
    fn walk_yields_every_entry_excluding_the_root() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        let seen = rel_set(DirPath::new(temp.path()).walk());
        let want: BTreeSet<PathBuf> = ["file1.txt", "sub", "sub/nested", "sub/nested/file2.txt"]
            .iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(seen, want);
    }

    #[test]
    fn walk_is_pre_order() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        let rels: Vec<PathBuf> = DirPath::new(temp.path())
            .walk()
            .map(|item| item.unwrap().rel().as_path().to_path_buf())
            .collect();

        // Every entry appears after all of its ancestors.
        for (i, rel) in rels.iter().enumerate() {
            for ancestor in rel.ancestors().skip(1) {
                if ancestor.as_os_str().is_empty() {
                    continue;
                }
                let pos = rels.iter().position(|r| r == ancestor);
                assert!(pos.is_some_and(|p| p < i), "{ancestor:?} after {rel:?}");
            }
        }
    }

    #[test]
    fn walk_matches_walkdir() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());
        fs::create_dir(temp.path().join("empty")).unwrap();

        let ours = rel_set(DirPath::new(temp.path()).walk());
        let theirs: BTreeSet<PathBuf> = walkdir::WalkDir::new(temp.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != temp.path())
            .map(|e| e.path().strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(ours, theirs);
    }

    #[test]
    fn skip_current_dir_prunes_the_subtree() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        let mut walker = DirPath::new(temp.path()).walk();
        let mut seen = Vec::new();
        while let Some(item) = walker.next() {
            let entry = item.unwrap();
            let rel = entry.rel().as_path().to_path_buf();
            if rel == Path::new("sub") {
                walker.skip_current_dir();
            }
            seen.push(rel);
        }

        assert!(seen.contains(&PathBuf::from("sub")));
        assert!(seen.iter().all(|r| !r.starts_with("sub/")));
        assert!(seen.contains(&PathBuf::from("file1.txt")));
    }

    #[test]
    fn stopping_early_reads_no_further_directories() {
        let temp = tempfile::tempdir().unwrap();
        // Root contains a single subdirectory stuffed with files.
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        for i in 0..10 {
            fs::write(sub.join(format!("f{i}.txt")), b"x").unwrap();
        }

        let mut walker = DirPath::new(temp.path()).walk();
        let first = walker.next().unwrap().unwrap();
        assert_eq!(first.rel().as_path(), Path::new("sub"));

        // The sub frame was pushed but its directory was never opened.
        assert_eq!(walker.open_dirs(), 1);
        drop(walker);
    }

    #[test]
    fn missing_root_yields_one_error_then_ends() {
        let temp = tempfile::tempdir().unwrap();
        let mut walker = DirPath::new(temp.path().join("absent")).walk();

        let err = walker.next().unwrap().unwrap_err();
        assert!(matches!(err, PathError::ReadDir { .. }));
        assert_eq!(err.path(), Some(Path::new(".")));
        assert!(walker.next().is_none());
    }

    #[test]
    fn with_root_entry_yields_the_root_first() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        let mut walker = DirPath::new(temp.path()).walk_with_root();
        let first = walker.next().unwrap().unwrap();
        assert!(first.is_root());
        assert_eq!(first.rel().as_path(), Path::new("."));
        assert_eq!(first.depth(), 0);
        assert!(first.is_dir());

        let rest = rel_set(walker);
        assert!(rest.contains(Path::new("file1.txt")));
    }

    #[test]
    fn skipping_the_root_entry_ends_the_walk() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        let mut walker = DirPath::new(temp.path()).walk_with_root();
        let first = walker.next().unwrap().unwrap();
        assert!(first.is_root());
        walker.skip_current_dir();
        assert!(walker.next().is_none());
    }

    #[test]
    fn files_view_filters_without_reordering() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        let files = rel_set(DirPath::new(temp.path()).walk_files());
        let want: BTreeSet<PathBuf> = ["file1.txt", "sub/nested/file2.txt"]
            .iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(files, want);

        let dirs = rel_set(DirPath::new(temp.path()).walk_dirs());
        let want: BTreeSet<PathBuf> = ["sub", "sub/nested"].iter().map(PathBuf::from).collect();
        assert_eq!(dirs, want);
    }

    #[test]
    fn for_each_entry_directives_steer_the_walk() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        let mut seen = Vec::new();
        DirPath::new(temp.path()).walk().for_each_entry(|item| {
            let entry = item.unwrap();
            let rel = entry.rel().as_path().to_path_buf();
            seen.push(rel.clone());
            if rel == Path::new("sub") {
                FlowControl::SkipSubtree
            } else {
                FlowControl::Continue
            }
        });
        assert!(seen.iter().all(|r| !r.starts_with("sub/")));

        let mut count = 0;
        DirPath::new(temp.path()).walk().for_each_entry(|_| {
            count += 1;
            FlowControl::Stop
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn each_walk_call_is_an_independent_traversal() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        let root = DirPath::new(temp.path());
        let first = rel_set(root.walk());
        let second = rel_set(root.walk());
        assert_eq!(first, second);
    }

    #[test]
    fn walked_entry_accessors() {
        let temp = tempfile::tempdir().unwrap();
        build_tree(temp.path());

        for item in DirPath::new(temp.path()).walk() {
            let entry = item.unwrap();
            assert_eq!(entry.root().as_path(), temp.path());
            assert_eq!(
                entry.full_path().as_path(),
                temp.path().join(entry.rel().as_path())
            );
            assert_eq!(entry.depth(), entry.rel().as_path().components().count());
            if entry.is_file() {
                assert!(entry.filename().as_str().ends_with(".txt"));
            }
            if entry.is_dir() {
                let seg = entry.path_segment();
                assert!(!seg.as_str().is_empty());
            }
        }
    }
}
