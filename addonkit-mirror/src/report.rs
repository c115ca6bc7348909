//! Per-destination and per-run outcomes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single entry that could not be removed or copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub message: String,
}

impl ItemFailure {
    pub fn new(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// What happened at one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DestinationStatus {
    /// Cleanup and copy both completed without a single failure.
    Mirrored,
    /// The copy ran, but cleanup was abandoned or some items failed.
    Partial,
    /// Nothing was copied.
    Skipped { reason: String },
    /// Dry run: counts describe what a real run would do.
    Planned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationReport {
    pub root: PathBuf,
    pub target: PathBuf,
    pub status: DestinationStatus,
    /// Entries removed from the target before copying.
    pub removed: usize,
    /// Files copied into the target.
    pub copied: usize,
    pub failures: Vec<ItemFailure>,
}

impl DestinationReport {
    pub(crate) fn new(root: &Path, target: &Path, status: DestinationStatus) -> Self {
        Self {
            root: root.to_path_buf(),
            target: target.to_path_buf(),
            status,
            removed: 0,
            copied: 0,
            failures: Vec::new(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.status, DestinationStatus::Skipped { .. })
    }
}

/// Outcome of a full mirror run.
#[derive(Debug, Clone, Serialize)]
pub struct MirrorReport {
    pub source_url: String,
    pub subdir: String,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub destinations: Vec<DestinationReport>,
}

impl MirrorReport {
    /// Number of destinations whose status matches `pred`.
    pub fn count(&self, pred: impl Fn(&DestinationStatus) -> bool) -> usize {
        self.destinations.iter().filter(|d| pred(&d.status)).count()
    }

    /// `true` when every destination was mirrored (or planned) without failures.
    pub fn is_clean(&self) -> bool {
        self.destinations.iter().all(|d| {
            matches!(
                d.status,
                DestinationStatus::Mirrored | DestinationStatus::Planned
            )
        })
    }
}
