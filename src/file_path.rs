use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;
use log::debug;

use crate::dir_path::DirPath;
use crate::error::{PathError, Result};
use crate::expand::relative_to;
use crate::segment::{FileExt, Filename};
use crate::status::EntryStatus;
use crate::traits::{Classify, PathLike, PathOps};

// ---------------------------------------------------------------------------
// CopyOptions
// ---------------------------------------------------------------------------

/// Options for [`FilePath::copy_to`] and [`FilePath::copy_to_dir`].
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Overwrite an existing destination. When `false` (the default), an
    /// existing destination is [`PathError::AlreadyExists`].
    pub force: bool,

    /// Permissions for the destination. `None` preserves the source file's
    /// permissions.
    pub permissions: Option<fs::Permissions>,
}

impl CopyOptions {
    pub fn force() -> Self {
        Self {
            force: true,
            permissions: None,
        }
    }
}

// ---------------------------------------------------------------------------
// FilePath
// ---------------------------------------------------------------------------

/// An absolute or relative file path, name and extension included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(PathBuf);

impl FilePath {
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

    /// The file's name, extension included.
    pub fn file_name(&self) -> Filename {
        match self.0.file_name() {
            Some(name) => Filename::new(name.to_string_lossy()),
            None => Filename::new(""),
        }
    }

    /// The extension with its leading period, or an empty extension when the
    /// name has none.
    pub fn extension(&self) -> FileExt {
        self.file_name().extension()
    }

    /// Whether a regular file exists at this path. A missing entry or an
    /// entry of another kind reports `false`.
    pub fn exists(&self) -> Result<bool> {
        Ok(self.status()?.is_file())
    }

    /// The path of this file relative to `base`.
    pub fn rel_to(&self, base: &DirPath) -> Result<RelFilePath> {
        let rel = relative_to(&self.0, base.as_path())?;
        Ok(RelFilePath::new(rel))
    }

    // ── File I/O ──────────────────────────────────────────────────────────

    pub fn create(&self) -> Result<fs::File> {
        fs::File::create(&self.0).map_err(|source| self.io_err(source))
    }

    pub fn open(&self) -> Result<fs::File> {
        fs::File::open(&self.0).map_err(|source| self.io_err(source))
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.0).map_err(|source| self.io_err(source))
    }

    pub fn read_to_string(&self) -> Result<String> {
        fs::read_to_string(&self.0).map_err(|source| self.io_err(source))
    }

    pub fn write<D: AsRef<[u8]>>(&self, data: D) -> Result<()> {
        fs::write(&self.0, data).map_err(|source| self.io_err(source))
    }

    pub fn remove(&self) -> Result<()> {
        fs::remove_file(&self.0).map_err(|source| self.io_err(source))
    }

    /// Set the file's access and modification times.
    pub fn set_times(&self, accessed: SystemTime, modified: SystemTime) -> Result<()> {
        filetime::set_file_times(
            &self.0,
            FileTime::from_system_time(accessed),
            FileTime::from_system_time(modified),
        )
        .map_err(|source| self.io_err(source))
    }

    // ── Copying ───────────────────────────────────────────────────────────

    /// Copy this file to `dest`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// [`PathError::PathIsDirectory`] when the source is a directory,
    /// [`PathError::AlreadyExists`] when `dest` exists and
    /// [`CopyOptions::force`] is not set, and I/O errors otherwise.
    pub fn copy_to(&self, dest: &FilePath, opts: &CopyOptions) -> Result<()> {
        let src_meta = self.metadata()?;
        if src_meta.is_dir() {
            return Err(PathError::PathIsDirectory(self.0.clone()));
        }

        if !opts.force && fs::symlink_metadata(&dest.0).is_ok() {
            return Err(PathError::AlreadyExists(dest.0.clone()));
        }

        dest.parent().create_dir_all()?;

        debug!("copying {:?} to {:?}", self.0, dest.0);
        let mut reader = self.open()?;
        let mut writer = dest.create()?;
        io::copy(&mut reader, &mut writer).map_err(|source| dest.io_err(source))?;
        drop(writer);

        let permissions = opts
            .permissions
            .clone()
            .unwrap_or_else(|| src_meta.permissions());
        fs::set_permissions(&dest.0, permissions).map_err(|source| dest.io_err(source))?;
        Ok(())
    }

    /// Copy this file into the directory `dest`, keeping its name. Returns
    /// the destination file path.
    ///
    /// # Errors
    ///
    /// [`PathError::PathIsFile`] when `dest` is a regular file,
    /// [`PathError::UnsupportedEntry`] when it is missing or of another
    /// kind, plus everything [`copy_to`](Self::copy_to) can return.
    pub fn copy_to_dir(&self, dest: &DirPath, opts: &CopyOptions) -> Result<FilePath> {
        match dest.status()? {
            EntryStatus::Directory => {
                let target = FilePath::new(dest.as_path().join(self.file_name().as_str()));
                self.copy_to(&target, opts)?;
                Ok(target)
            }
            EntryStatus::File => Err(PathError::PathIsFile(dest.as_path().to_path_buf())),
            status => Err(PathError::UnsupportedEntry {
                path: dest.as_path().to_path_buf(),
                status,
            }),
        }
    }

    fn io_err(&self, source: io::Error) -> PathError {
        PathError::Io {
            path: self.0.clone(),
            source,
        }
    }
}

impl PathLike for FilePath {
    fn as_path(&self) -> &Path {
        &self.0
    }
}

impl PathOps for FilePath {
    fn from_path(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(PathBuf::from(s))
    }
}

// ---------------------------------------------------------------------------
// RelFilePath
// ---------------------------------------------------------------------------

/// A relative file path, name and extension included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelFilePath(PathBuf);

impl RelFilePath {
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

    pub fn parent(&self) -> DirPath {
        match self.0.parent() {
            Some(p) if !p.as_os_str().is_empty() => DirPath::new(p),
            _ => DirPath::new("."),
        }
    }

    pub fn file_name(&self) -> Filename {
        match self.0.file_name() {
            Some(name) => Filename::new(name.to_string_lossy()),
            None => Filename::new(""),
        }
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.0).map_err(|source| PathError::Io {
            path: self.0.clone(),
            source,
        })
    }
}

impl PathLike for RelFilePath {
    fn as_path(&self) -> &Path {
        &self.0
    }
}

impl PathOps for RelFilePath {
    fn from_path(path: PathBuf) -> Self {
        Self(path)
    }
}

impl fmt::Display for RelFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

impl AsRef<Path> for RelFilePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
