use std::collections::HashSet;
use std::hash::Hash;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{PathError, Result};
use crate::status::{classify, EntryStatus};

/// Whether the directory governing `path` accepts writes.
///
/// The governing directory is the path itself when it is a directory, or its
/// parent when the path is a file or does not exist yet. The check is a real
/// probe — a temporary file is created there and removed again — because
/// permission bits alone cannot account for read-only filesystems or ACLs.
///
/// Returns `Ok(false)` on permission denial; any other probe failure is an
/// error the caller can interpret. Probe cleanup failures are logged, never
/// returned.
pub fn can_write<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();

    let dir = match classify(path, true)? {
        EntryStatus::Directory => path.to_path_buf(),
        EntryStatus::Missing | EntryStatus::File => match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        },
        status => {
            return Err(PathError::UnsupportedEntry {
                path: path.to_path_buf(),
                status,
            })
        }
    };

    match tempfile::Builder::new()
        .prefix(".canwrite-")
        .tempfile_in(&dir)
    {
        Ok(probe) => {
            if let Err(e) = probe.close() {
                warn!("failed to remove write probe in {:?}: {e}", dir);
            }
            Ok(true)
        }
        Err(source) if source.kind() == io::ErrorKind::PermissionDenied => Ok(false),
        Err(source) => Err(PathError::Io { path: dir, source }),
    }
}

/// Deduplicate `items`, keeping the first occurrence of each value and the
/// original order otherwise.
pub fn unique<T>(items: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    if items.len() < 2 {
        return items.to_vec();
    }

    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert((*item).clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn can_write_in_a_temp_directory() {
        let temp = tempfile::tempdir().unwrap();
        assert!(can_write(temp.path()).unwrap());

        // A file path resolves to its parent directory.
        let file = temp.path().join("f.txt");
        fs::write(&file, b"x").unwrap();
        assert!(can_write(&file).unwrap());

        // A missing path also resolves to its parent.
        assert!(can_write(temp.path().join("not-yet")).unwrap());
    }

    #[test]
    fn unique_keeps_first_occurrence_in_order() {
        let input = vec!["b", "a", "b", "c", "a"];
        assert_eq!(unique(&input), vec!["b", "a", "c"]);

        let empty: Vec<i32> = Vec::new();
        assert!(unique(&empty).is_empty());
        assert_eq!(unique(&[7]), vec![7]);
        assert_eq!(unique(&[3, 3, 3]), vec![3]);
    }
}
