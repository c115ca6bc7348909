//! Merge-copy a scratch tree into a target.
//!
//! Top-level directories named in `exclude` are skipped. Directories merge
//! into whatever already exists at the target; files are overwritten and keep
//! their access and modification times. A failing item is recorded and the
//! walk carries on with its siblings.

use std::path::Path;

use filetime::FileTime;

use crate::clean::is_excluded;
use crate::report::ItemFailure;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopySummary {
    pub copied: usize,
    pub failures: Vec<ItemFailure>,
}

impl CopySummary {
    fn fail(&mut self, path: &Path, err: std::io::Error) {
        tracing::error!(path = %path.display(), error = %err, "copy failed");
        self.failures.push(ItemFailure::new(path, &err));
    }
}

pub fn copy_tree(src: &Path, dest: &Path, exclude: &[String]) -> CopySummary {
    let mut summary = CopySummary::default();

    let entries = match std::fs::read_dir(src) {
        Ok(entries) => entries,
        Err(e) => {
            summary.fail(src, e);
            return summary;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                summary.fail(src, e);
                continue;
            }
        };
        let from = entry.path();
        let to = dest.join(entry.file_name());

        if from.is_dir() {
            if is_excluded(&entry.file_name().to_string_lossy(), exclude) {
                continue;
            }
            copy_dir_merge(&from, &to, &mut summary);
        } else {
            copy_entry_file(&from, &to, &mut summary);
        }
    }

    summary
}

/// Number of files [`copy_tree`] would copy.
pub fn plan_copy(src: &Path, exclude: &[String]) -> usize {
    let Ok(entries) = std::fs::read_dir(src) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| {
            let path = e.path();
            if !path.is_dir() {
                1
            } else if is_excluded(&e.file_name().to_string_lossy(), exclude) {
                0
            } else {
                count_files(&path)
            }
        })
        .sum()
}

fn count_files(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| {
            let path = e.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

fn copy_dir_merge(src: &Path, dest: &Path, summary: &mut CopySummary) {
    if let Err(e) = std::fs::create_dir_all(dest) {
        summary.fail(dest, e);
        return;
    }
    let entries = match std::fs::read_dir(src) {
        Ok(entries) => entries,
        Err(e) => {
            summary.fail(src, e);
            return;
        }
    };
    for entry in entries {
        match entry {
            Ok(entry) => {
                let from = entry.path();
                let to = dest.join(entry.file_name());
                if from.is_dir() {
                    copy_dir_merge(&from, &to, summary);
                } else {
                    copy_entry_file(&from, &to, summary);
                }
            }
            Err(e) => summary.fail(src, e),
        }
    }
}

fn copy_entry_file(from: &Path, to: &Path, summary: &mut CopySummary) {
    match copy_file_preserving_times(from, to) {
        Ok(()) => summary.copied += 1,
        Err(e) => summary.fail(from, e),
    }
}

/// `fs::copy` keeps permission bits; timestamps are restored separately.
fn copy_file_preserving_times(from: &Path, to: &Path) -> std::io::Result<()> {
    std::fs::copy(from, to)?;
    let meta = std::fs::metadata(from)?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_only() -> Vec<String> {
        vec![".git".to_string()]
    }

    fn fixture() -> TempDir {
        let src = TempDir::new().unwrap();
        let s = src.path();
        fs::create_dir_all(s.join(".git").join("refs")).unwrap();
        fs::write(s.join(".git").join("HEAD"), "ref: main").unwrap();
        fs::create_dir_all(s.join("Libs").join("Nested")).unwrap();
        fs::write(s.join("Libs").join("Nested").join("util.lua"), "return {}").unwrap();
        fs::write(s.join("Addon.toc"), "## Title: Addon").unwrap();
        src
    }

    #[test]
    fn copies_everything_but_top_level_excluded_dirs() {
        let src = fixture();
        let dest = TempDir::new().unwrap();

        let summary = copy_tree(src.path(), dest.path(), &git_only());
        assert_eq!(summary.copied, 2);
        assert!(summary.failures.is_empty());
        assert!(!dest.path().join(".git").exists());
        assert_eq!(
            fs::read_to_string(dest.path().join("Libs").join("Nested").join("util.lua")).unwrap(),
            "return {}"
        );
    }

    #[test]
    fn merges_into_existing_directories() {
        let src = fixture();
        let dest = TempDir::new().unwrap();
        fs::create_dir_all(dest.path().join("Libs")).unwrap();
        fs::write(dest.path().join("Libs").join("keep.lua"), "local").unwrap();

        copy_tree(src.path(), dest.path(), &git_only());
        assert!(dest.path().join("Libs").join("keep.lua").exists());
        assert!(dest.path().join("Libs").join("Nested").join("util.lua").exists());
    }

    #[test]
    fn preserves_modification_time() {
        let src = fixture();
        let file = src.path().join("Addon.toc");
        let old = FileTime::from_unix_time(1_000_000_000, 0);
        filetime::set_file_mtime(&file, old).unwrap();

        let dest = TempDir::new().unwrap();
        copy_tree(src.path(), dest.path(), &git_only());

        let meta = fs::metadata(dest.path().join("Addon.toc")).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta), old);
    }

    #[test]
    fn one_failure_does_not_stop_siblings() {
        let src = fixture();
        let dest = TempDir::new().unwrap();
        // A file where a directory must go makes the `Libs` subtree fail.
        fs::write(dest.path().join("Libs"), "in the way").unwrap();

        let summary = copy_tree(src.path(), dest.path(), &git_only());
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.copied, 1);
        assert!(dest.path().join("Addon.toc").exists());
    }

    #[test]
    fn plan_counts_files_recursively() {
        let src = fixture();
        assert_eq!(plan_copy(src.path(), &git_only()), 2);
        assert_eq!(plan_copy(src.path(), &[]), 3);
    }
}
