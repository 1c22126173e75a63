use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PathError, Result};

/// Classification of a filesystem entry.
///
/// Produced by [`Classify::status`](crate::Classify::status) and
/// [`Classify::symlink_status`](crate::Classify::symlink_status); consumed
/// immediately by callers to branch. A missing entry is a normal outcome
/// ([`EntryStatus::Missing`]), never an error — only a stat failure for some
/// other reason (permissions, a non-directory path component, ...) produces
/// an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// The entry does not exist.
    Missing,

    /// A regular file.
    File,

    /// A directory.
    Directory,

    /// A symbolic link (only reported when symlinks are not followed).
    Symlink,

    /// A Unix domain socket.
    Socket,

    /// A named pipe (FIFO).
    Pipe,

    /// A block or character device.
    Device,

    /// Some other kind of entry the platform reports but this crate does not
    /// distinguish.
    Unclassified,
}

impl EntryStatus {
    /// Whether the entry exists at all, in any form.
    pub fn exists(self) -> bool {
        self != Self::Missing
    }

    pub fn is_file(self) -> bool {
        self == Self::File
    }

    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Missing => "missing",
            Self::File => "a file",
            Self::Directory => "a directory",
            Self::Symlink => "a symlink",
            Self::Socket => "a socket",
            Self::Pipe => "a named pipe",
            Self::Device => "a device",
            Self::Unclassified => "an unclassified entry",
        };
        f.write_str(s)
    }
}

/// Stat `path` and classify the result.
///
/// `follow` selects stat vs lstat semantics: when true, symlinks are resolved
/// and [`EntryStatus::Symlink`] is never produced. One stat call per
/// invocation, no retries.
pub(crate) fn classify(path: &Path, follow: bool) -> Result<EntryStatus> {
    let metadata = if follow {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    };

    match metadata {
        Ok(meta) => Ok(classify_file_type(meta.file_type())),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(EntryStatus::Missing),
        Err(source) => Err(PathError::Stat {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Map a [`fs::FileType`] to an [`EntryStatus`].
///
/// Checked in fixed precedence: file, directory, symlink, then the Unix-only
/// kinds. Platforms lacking a kind simply never produce it.
pub(crate) fn classify_file_type(file_type: fs::FileType) -> EntryStatus {
    if file_type.is_file() {
        return EntryStatus::File;
    }
    if file_type.is_dir() {
        return EntryStatus::Directory;
    }
    if file_type.is_symlink() {
        return EntryStatus::Symlink;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::FileTypeExt;

        if file_type.is_socket() {
            return EntryStatus::Socket;
        }
        if file_type.is_fifo() {
            return EntryStatus::Pipe;
        }
        if file_type.is_block_device() || file_type.is_char_device() {
            return EntryStatus::Device;
        }
    }

    EntryStatus::Unclassified
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_entry_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let status = classify(&dir.path().join("nope"), true).unwrap();
        assert_eq!(status, EntryStatus::Missing);
    }

    #[test]
    fn classifies_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, b"x").unwrap();

        assert_eq!(classify(&file, true).unwrap(), EntryStatus::File);
        assert_eq!(classify(dir.path(), true).unwrap(), EntryStatus::Directory);
    }

    #[test]
    fn stat_failure_other_than_absence_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, b"x").unwrap();

        // A regular file used as a directory component fails with ENOTDIR,
        // which must not be conflated with Missing.
        let err = classify(&file.join("child"), true).unwrap_err();
        assert!(matches!(err, PathError::Stat { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_status_does_not_follow() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target.txt");
        let link = dir.path().join("link");
        fs::write(&target, b"x").unwrap();
        symlink(&target, &link).unwrap();

        assert_eq!(classify(&link, false).unwrap(), EntryStatus::Symlink);
        assert_eq!(classify(&link, true).unwrap(), EntryStatus::File);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_follows_to_missing() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("dangling");
        symlink(dir.path().join("nowhere"), &link).unwrap();

        assert_eq!(classify(&link, true).unwrap(), EntryStatus::Missing);
        assert_eq!(classify(&link, false).unwrap(), EntryStatus::Symlink);
    }
}
