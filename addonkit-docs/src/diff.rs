//! Unified diff between a rendered document and what is on disk.

use std::path::Path;

use similar::TextDiff;

use crate::error::DocError;
use crate::writer::{normalize_line_endings, read_existing};

/// Diff `rendered` against the current content of `path` (missing = empty).
///
/// Returns `None` when they are identical. No files are written.
pub fn diff_document(path: &Path, rendered: &str) -> Result<Option<String>, DocError> {
    let rendered = normalize_line_endings(rendered);
    let existing = read_existing(path)?.unwrap_or_default();
    if existing == rendered {
        return Ok(None);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let old_header = format!("a/{name}");
    let new_header = format!("b/{name}");
    let unified = TextDiff::from_lines(&existing, &rendered)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();
    Ok(Some(unified))
}
