//! Scratch clone directory.
//!
//! [`Scratch`] owns a `tempfile::TempDir`; the directory and everything the
//! fetcher put in it are removed when the value drops, whichever way the
//! enclosing scope exits.

use std::path::Path;

use tempfile::TempDir;

use crate::error::{io_err, MirrorError};
use crate::fetch::RepoFetcher;

pub const SCRATCH_PREFIX: &str = "addonkit-";

#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    /// Create a temporary directory and have `fetcher` populate it.
    ///
    /// On fetch failure the directory is dropped (and removed) before the
    /// error is returned.
    pub fn acquire(fetcher: &dyn RepoFetcher, source_url: &str) -> Result<Self, MirrorError> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(|e| io_err(std::env::temp_dir(), e))?;
        fetcher.fetch(source_url, dir.path())?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
