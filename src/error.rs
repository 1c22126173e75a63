use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::status::EntryStatus;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PathError>;

#[derive(Error, Debug)]
pub enum PathError {
    // Parsing
    #[error("path is empty")]
    Empty,

    #[error("not a tilde-prefixed path: {0:?}")]
    NotTilde(String),

    #[error("invalid path segment {segment:?}: {reason}")]
    InvalidSegment { segment: String, reason: String },

    #[error("invalid URL segment {segment:?}: {reason}")]
    InvalidUrlSegment { segment: String, reason: String },

    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    // Classification
    #[error("could not stat {path:?}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read directory {path:?}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Operations
    #[error("{0:?} is a file, expected a directory")]
    PathIsFile(PathBuf),

    #[error("{0:?} is a directory, expected a file")]
    PathIsDirectory(PathBuf),

    #[error("unexpected entry kind for {path:?}: {status}")]
    UnsupportedEntry { path: PathBuf, status: EntryStatus },

    #[error("{0:?} already exists")]
    AlreadyExists(PathBuf),

    #[error("{path:?} cannot be made relative to {base:?}")]
    NotRelative { path: PathBuf, base: PathBuf },

    // Environment
    #[error("cannot determine home directory")]
    HomeDirUnavailable,

    #[error("path contains invalid UTF-8: {0:?}")]
    NonUtf8(PathBuf),

    #[error("IO error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PathError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "skipped: <path>" without pattern matching
    /// on variants. For walker errors the path is relative to the walked root.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PathIsFile(p)
            | Self::PathIsDirectory(p)
            | Self::AlreadyExists(p)
            | Self::NonUtf8(p) => Some(p),
            Self::Stat { path, .. }
            | Self::ReadDir { path, .. }
            | Self::UnsupportedEntry { path, .. }
            | Self::NotRelative { path, .. }
            | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the error came from the operating system rather than from
    /// syntactic validation. OS-level errors usually warrant surfacing
    /// verbatim; validation errors mean the input itself is wrong.
    pub fn is_os_error(&self) -> bool {
        matches!(
            self,
            Self::Stat { .. } | Self::ReadDir { .. } | Self::Io { .. }
        )
    }
}
