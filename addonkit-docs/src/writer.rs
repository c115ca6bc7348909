//! Hash-gated atomic writer for generated documents.
//!
//! ## `write_document` protocol
//!
//! 1. Normalise line endings to LF.
//! 2. SHA-256 hash the rendered content and the current file (if any).
//! 3. Identical → skip; the file and its mtime are left alone.
//! 4. Write to `<path>.addonkit.tmp`.
//! 5. Rename to the final path (atomic on POSIX).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{io_err, DocError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — on-disk content already matches.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

pub fn digest(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(content.as_bytes());
    hex::encode(h.finalize())
}

/// Atomically write `content` to `path` unless it already holds exactly that.
pub fn write_document(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, DocError> {
    let tmp = PathBuf::from(format!("{}.addonkit.tmp", path.display()));
    write_with_tmp(path, content, dry_run, &tmp)
}

fn write_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, DocError> {
    let normalized = normalize_line_endings(content);
    let content = normalized.as_str();
    let new_digest = digest(content);

    if let Some(existing) = read_existing(path)? {
        if digest(&existing) == new_digest {
            tracing::debug!(path = %path.display(), "unchanged");
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!(path = %path.display(), "[dry-run] would write");
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!(path = %path.display(), sha256 = %new_digest, "wrote");
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Current content of `path` with LF line endings; `None` when it does not exist.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>, DocError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(normalize_line_endings(&content))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("greeting.md");
        let result = write_document(&path, "hello", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn same_content_returns_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.md");
        write_document(&path, "same", false).unwrap();
        let result = write_document(&path, "same", false).unwrap();
        assert_eq!(result, WriteResult::Unchanged { path });
    }

    #[test]
    fn changed_content_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("file.md");
        write_document(&path, "v1", false).unwrap();
        let result = write_document(&path, "v2", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.md");
        let result = write_document(&path, "content", true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!path.exists(), "dry-run must not create files");
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.md");
        write_document(&path, "data", false).unwrap();
        let tmp_path = PathBuf::from(format!("{}.addonkit.tmp", path.display()));
        assert!(!tmp_path.exists(), ".addonkit.tmp must be cleaned up");
    }

    #[test]
    fn crlf_on_disk_counts_as_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("normalize.md");
        fs::write(&path, "line1\r\nline2\r\n").unwrap();
        let result = write_document(&path, "line1\nline2\n", false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn digest_is_hex_sha256() {
        assert_eq!(
            digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();
        let path = readonly_dir.join("file.md");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Privileged users ignore directory modes; nothing to observe then.
        let privileged = fs::write(readonly_dir.join("probe"), "x").is_ok();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("file.md.addonkit.tmp");
        let result = write_with_tmp(&path, "new content", false, &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();
        if privileged {
            return;
        }

        assert!(result.is_err(), "rename should fail on readonly dir");
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(!tmp_path.exists(), ".addonkit.tmp should be cleaned up");
    }
}
