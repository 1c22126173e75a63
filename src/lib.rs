//! # pathkind
//!
//! Typed filesystem paths — semantic path kinds with classification,
//! traversal, and expansion.
//!
//! pathkind replaces raw path strings with a set of semantically distinct
//! wrappers ([`DirPath`], [`FilePath`], [`RelPath`], [`PathSegment`], ...)
//! so incompatible path kinds cannot be mixed, and layers the everyday
//! conveniences over `std::fs`: existence checks that distinguish kind,
//! lazy directory walking with subtree pruning, tilde expansion, and file
//! copying.
//!
//! Three pieces carry most of the weight:
//!
//! - **Classification** ([`Classify`]): one stat per call, mapped to a closed
//!   [`EntryStatus`]. A missing entry is `Ok(EntryStatus::Missing)`, never an
//!   error — only stat failures for *other* reasons are `Err`.
//! - **Traversal** ([`Walker`]): depth-first, pre-order, lazily produced.
//!   Directories are read exactly once, when reached; a read failure is
//!   yielded for that directory and the walk continues; consumers prune with
//!   [`Walker::skip_current_dir`] or a [`FlowControl`] callback and stop by
//!   not pulling.
//! - **Expansion** ([`expand`]): `.`, `~`, and `~/rest` resolve to absolute
//!   paths; `~foo` stays a literal name.
//!
//! # Quick start
//!
//! ```
//! use pathkind::{Classify, DirPath, EntryStatus};
//! use std::fs;
//!
//! let temp = tempfile::tempdir().unwrap();
//! fs::write(temp.path().join("file1.txt"), b"one").unwrap();
//! fs::create_dir_all(temp.path().join("sub/nested")).unwrap();
//! fs::write(temp.path().join("sub/nested/file2.txt"), b"two").unwrap();
//!
//! let root = DirPath::new(temp.path());
//! assert_eq!(root.status().unwrap(), EntryStatus::Directory);
//!
//! // Walk the tree: every file and directory below the root.
//! let mut seen: Vec<String> = root
//!     .walk()
//!     .filter_map(|item| item.ok())
//!     .map(|entry| entry.rel().to_string())
//!     .collect();
//! seen.sort();
//! assert_eq!(
//!     seen,
//!     vec!["file1.txt", "sub", "sub/nested", "sub/nested/file2.txt"]
//! );
//!
//! // Files-only view of the same traversal.
//! assert_eq!(root.walk_files().count(), 2);
//! ```
//!
//! # Pruning and early stop
//!
//! ```
//! use pathkind::{DirPath, FlowControl};
//! use std::fs;
//!
//! let temp = tempfile::tempdir().unwrap();
//! fs::create_dir_all(temp.path().join("keep")).unwrap();
//! fs::create_dir_all(temp.path().join("skip/below")).unwrap();
//!
//! let mut seen = Vec::new();
//! DirPath::new(temp.path()).walk().for_each_entry(|item| {
//!     let entry = item.unwrap();
//!     seen.push(entry.rel().to_string());
//!     if entry.rel().as_path() == std::path::Path::new("skip") {
//!         FlowControl::SkipSubtree
//!     } else {
//!         FlowControl::Continue
//!     }
//! });
//! assert!(!seen.iter().any(|rel| rel.starts_with("skip/")));
//! ```

#![forbid(unsafe_code)]

mod dir_path;
mod entry;
mod entry_path;
mod error;
mod expand;
mod file_path;
mod ident;
mod segment;
mod segments;
mod status;
mod traits;
mod urls;
mod util;
mod walk;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use dir_path::DirPath;
pub use entry::WalkedEntry;
pub use entry_path::{EntryPath, RelPath};
pub use error::{PathError, Result};
pub use expand::{expand, TildePath};
pub use file_path::{CopyOptions, FilePath, RelFilePath};
pub use ident::{Identifier, Version};
pub use segment::{FileExt, Filename, PathSegment, VolumeName};
pub use segments::PathSegments;
pub use status::EntryStatus;
pub use traits::{Classify, PathLike, PathOps};
pub use urls::{Url, UrlSegment, UrlSegments};
pub use util::{can_write, unique};
pub use walk::{FlowControl, WalkDirs, WalkFiles, Walker};
