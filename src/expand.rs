//! Path expansion: tilde resolution, absolutization, and lexical cleaning.
//!
//! Everything here is either purely lexical ([`clean`]) or touches the
//! environment only through the current working directory and the user's
//! home directory. No path is required to exist.

use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR_STR};

use crate::dir_path::DirPath;
use crate::entry_path::EntryPath;
use crate::error::{PathError, Result};
use crate::traits::PathOps;

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// Expand `input` to an absolute [`EntryPath`].
///
/// - `""` is an error ([`PathError::Empty`]).
/// - `"."` resolves to the current working directory.
/// - `"~"`, or `~` followed by a separator, is tilde syntax: the home
///   directory joined with the remainder, lexically cleaned.
/// - `~` **not** followed by a separator (`"~foo"`) is a literal relative
///   path component — `~foo` is a valid, if unusual, filename.
/// - Anything else is cleaned and made absolute against the current
///   working directory.
///
/// On Windows both `/` and `\` count as the tilde separator; elsewhere only
/// `/` does.
///
/// # Example
///
/// ```
/// use pathkind::expand;
///
/// let home = pathkind::expand("~").unwrap();
/// let nested = pathkind::expand("~/projects").unwrap();
/// assert!(nested.as_path().starts_with(home.as_path()));
/// ```
pub fn expand(input: &str) -> Result<EntryPath> {
    if input.is_empty() {
        return Err(PathError::Empty);
    }

    if input == "." {
        let cwd = current_dir()?;
        return Ok(EntryPath::from_path(cwd));
    }

    if let Some(remainder) = tilde_remainder(input) {
        let home = home_dir()?;
        if remainder.is_empty() {
            return Ok(EntryPath::from_path(home));
        }
        return Ok(EntryPath::from_path(clean(&home.join(remainder))));
    }

    let abs = absolutize(Path::new(input))?;
    Ok(EntryPath::from_path(abs))
}

/// Split tilde syntax into its remainder.
///
/// Returns `Some("")` for `"~"`, `Some(rest)` (leading separators trimmed)
/// for `~/rest`, and `None` for anything that is not tilde syntax —
/// including `~foo`, which is a literal filename.
fn tilde_remainder(input: &str) -> Option<&str> {
    let rest = input.strip_prefix('~')?;
    if rest.is_empty() {
        return Some("");
    }
    if !rest.starts_with(is_separator) {
        return None;
    }
    Some(rest.trim_start_matches(is_separator))
}

fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

// ---------------------------------------------------------------------------
// TildePath
// ---------------------------------------------------------------------------

/// A `~`-prefixed directory path, validated at parse time.
///
/// The grammar is deliberately narrow: `~` alone, or `~` followed by a
/// separator and a remainder. `~foo` does not parse — it denotes a literal
/// directory named `~foo`, not a home-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TildePath(PathBuf);

impl TildePath {
    /// Parse `input` as tilde syntax.
    ///
    /// On Windows, `/` separators are normalized to `\`.
    ///
    /// # Errors
    ///
    /// [`PathError::Empty`] for empty input, [`PathError::NotTilde`] when
    /// the input does not match the tilde grammar.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        if !input.starts_with('~') {
            return Err(PathError::NotTilde(input.to_string()));
        }
        if input.len() > 1 && !input[1..].starts_with(is_separator) {
            return Err(PathError::NotTilde(input.to_string()));
        }

        let normalized = if cfg!(windows) {
            input.replace('/', MAIN_SEPARATOR_STR)
        } else {
            input.to_string()
        };
        Ok(Self(PathBuf::from(normalized)))
    }

    pub(crate) fn new_unchecked(path: PathBuf) -> Self {
        Self(path)
    }

    /// Resolve the tilde prefix against the user's home directory.
    ///
    /// `~` alone expands to the home directory itself; otherwise the
    /// remainder is joined onto it and the result lexically cleaned.
    pub fn expand(&self) -> Result<DirPath> {
        let raw = self
            .0
            .to_str()
            .ok_or_else(|| PathError::NonUtf8(self.0.clone()))?;

        let remainder = raw.strip_prefix('~').unwrap_or(raw);
        let remainder = remainder.trim_start_matches(is_separator);

        let home = home_dir()?;
        if remainder.is_empty() {
            return Ok(DirPath::from_path(home));
        }
        Ok(DirPath::from_path(clean(&home.join(remainder))))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for TildePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.display().fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Lexical helpers
// ---------------------------------------------------------------------------

/// Lexically clean `path`: drop `.` components and redundant separators,
/// resolve `..` against preceding components. Leading `..` on a relative
/// path is kept; `..` at an absolute root is dropped. An empty result
/// becomes `"."`. No filesystem access.
pub(crate) fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut rooted = false;
    // Normal components currently in `out` that a ".." may remove.
    let mut poppable = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                out.push(prefix.as_os_str());
                rooted = true;
            }
            Component::RootDir => {
                out.push(component.as_os_str());
                rooted = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if poppable > 0 {
                    out.pop();
                    poppable -= 1;
                } else if !rooted {
                    out.push("..");
                }
            }
            Component::Normal(name) => {
                out.push(name);
                poppable += 1;
            }
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Make `path` absolute against the current working directory, then clean it.
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean(path));
    }
    let cwd = current_dir()?;
    Ok(clean(&cwd.join(path)))
}

/// Lexically compute `path` relative to `base` (both absolutized first),
/// such that `base.join(result)` names `path`. Returns `"."` when they are
/// equal. Fails when the two share no root (e.g. different Windows volumes).
pub(crate) fn relative_to(path: &Path, base: &Path) -> Result<PathBuf> {
    let abs_path = absolutize(path)?;
    let abs_base = absolutize(base)?;

    let path_comps: Vec<Component<'_>> = abs_path.components().collect();
    let base_comps: Vec<Component<'_>> = abs_base.components().collect();

    let mut shared = 0;
    while shared < path_comps.len()
        && shared < base_comps.len()
        && path_comps[shared] == base_comps[shared]
    {
        shared += 1;
    }

    if shared == 0 {
        return Err(PathError::NotRelative {
            path: abs_path,
            base: abs_base,
        });
    }

    let mut out = PathBuf::new();
    for _ in shared..base_comps.len() {
        out.push("..");
    }
    for component in &path_comps[shared..] {
        out.push(component.as_os_str());
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    Ok(out)
}

pub(crate) fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or(PathError::HomeDirUnavailable)
}

pub(crate) fn current_dir() -> Result<PathBuf> {
    env::current_dir().map_err(|source| PathError::Io {
        path: PathBuf::from("."),
        source,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
