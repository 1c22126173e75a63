use std::fmt;
use std::path::Path;

use crate::error::{PathError, Result};
use crate::traits::PathLike;

// ---------------------------------------------------------------------------
// PathSegment
// ---------------------------------------------------------------------------

/// A single path component, validated for the current platform's filename
/// rules at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment(String);

impl PathSegment {
    /// Validate `input` against the running platform's filename rules.
    ///
    /// Unix and macOS: non-empty, no `/`, no NUL, at most 255 characters.
    /// Windows: additionally no `<>:"\|?*` or control characters, no
    /// trailing space or period, and not a reserved device name.
    pub fn parse(input: &str) -> Result<Self> {
        let check = if cfg!(windows) {
            validate_windows_segment(input)
        } else {
            validate_unix_segment(input)
        };
        match check {
            Ok(()) => Ok(Self(input.to_string())),
            Err(reason) => Err(PathError::InvalidSegment {
                segment: input.to_string(),
                reason,
            }),
        }
    }

    pub(crate) fn new_unchecked<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PathLike for PathSegment {
    fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PathSegment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for PathSegment {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Filename rules shared by Linux and macOS.
pub(crate) fn validate_unix_segment(s: &str) -> std::result::Result<(), String> {
    if s.is_empty() {
        return Err("segment is empty".to_string());
    }
    if s.contains('/') {
        return Err("contains '/'".to_string());
    }
    if s.bytes().any(|b| b == 0) {
        return Err("contains NUL".to_string());
    }
    if s.chars().count() > 255 {
        return Err("longer than 255 characters".to_string());
    }
    Ok(())
}

/// Windows filename rules, simplified but correct for common cases.
pub(crate) fn validate_windows_segment(s: &str) -> std::result::Result<(), String> {
    if s.is_empty() {
        return Err("segment is empty".to_string());
    }
    for c in s.chars() {
        if (c as u32) < 0x20 {
            return Err(format!("contains control character {:#04x}", c as u32));
        }
        if matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
            return Err(format!("contains invalid character {c:?}"));
        }
    }
    if s.ends_with(' ') {
        return Err("trailing space".to_string());
    }
    if s.ends_with('.') {
        return Err("trailing period".to_string());
    }

    // Device names are reserved with or without an extension.
    let stem = s.split('.').next().unwrap_or(s);
    let upper = stem.to_ascii_uppercase();
    let reserved = matches!(
        upper.as_str(),
        "CON" | "PRN" | "AUX" | "NUL"
    ) || (upper.len() == 4
        && (upper.starts_with("COM") || upper.starts_with("LPT"))
        && upper.as_bytes()[3].is_ascii_digit()
        && upper.as_bytes()[3] != b'0');
    if reserved {
        return Err(format!("reserved device name {stem:?}"));
    }

    if s.chars().count() > 255 {
        return Err("longer than 255 characters".to_string());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filename / FileExt / VolumeName
// ---------------------------------------------------------------------------

/// A file's name with extension, no directory component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filename(String);

impl Filename {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The extension with its leading period, empty when the name has none.
    /// Dotfiles like `.bashrc` have no extension.
    pub fn extension(&self) -> FileExt {
        match Path::new(&self.0).extension() {
            Some(ext) => FileExt(format!(".{}", ext.to_string_lossy())),
            None => FileExt(String::new()),
        }
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Filename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for Filename {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// A filename extension including its leading period, or empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileExt(String);

impl FileExt {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FileExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Windows volume prefix such as `C:` or `\\server\share`. Always empty on
/// other platforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeName(String);

impl VolumeName {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VolumeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
