//! Remove stale content from a mirror target.
//!
//! Excluded directories (normally `.git`) survive; every other directory is
//! removed recursively and every file or symlink individually. The first
//! failure stops the sweep and is classified by the caller's policy:
//! permission problems abandon the cleanup but let the copy proceed, anything
//! else skips the destination.

use std::io::ErrorKind;
use std::path::Path;

use crate::report::ItemFailure;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    Cleaned { removed: usize },
    /// Permission denied; the copy should still run.
    Abandoned { removed: usize, failure: ItemFailure },
    /// Any other error; the destination should be skipped.
    Failed { removed: usize, failure: ItemFailure },
}

pub fn clean_target(target: &Path, exclude: &[String]) -> CleanOutcome {
    let mut removed = 0;

    let entries = match std::fs::read_dir(target) {
        Ok(entries) => entries,
        Err(e) => return stop(removed, target, e),
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return stop(removed, target, e),
        };
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => return stop(removed, &path, e),
        };

        let result = if file_type.is_dir() {
            if is_excluded(&entry.file_name().to_string_lossy(), exclude) {
                continue;
            }
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };

        match result {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed");
                removed += 1;
            }
            Err(e) => return stop(removed, &path, e),
        }
    }

    CleanOutcome::Cleaned { removed }
}

/// Number of entries [`clean_target`] would remove. A missing target counts as empty.
pub fn plan_clean(target: &Path, exclude: &[String]) -> usize {
    let Ok(entries) = std::fs::read_dir(target) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
            !(is_dir && is_excluded(&e.file_name().to_string_lossy(), exclude))
        })
        .count()
}

pub(crate) fn is_excluded(name: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|e| e == name)
}

fn stop(removed: usize, path: &Path, err: std::io::Error) -> CleanOutcome {
    let failure = ItemFailure::new(path, &err);
    if err.kind() == ErrorKind::PermissionDenied {
        CleanOutcome::Abandoned { removed, failure }
    } else {
        CleanOutcome::Failed { removed, failure }
    }
}
