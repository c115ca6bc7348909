//! Repository acquisition.

use std::path::Path;
use std::process::Command;

use addonkit_core::GitOptions;

use crate::error::MirrorError;

/// Populates an empty directory with a checkout of `source_url`.
pub trait RepoFetcher {
    fn fetch(&self, source_url: &str, dest: &Path) -> Result<(), MirrorError>;
}

/// Runs the `git` command-line client (`<program> clone … <url> <dest>`).
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    options: GitOptions,
}

impl GitCli {
    pub fn new(options: GitOptions) -> Self {
        Self { options }
    }

    /// The clone invocation, without running it.
    pub fn command(&self, source_url: &str, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.options.program);
        cmd.arg("clone");
        if let Some(branch) = &self.options.branch {
            cmd.arg("--branch").arg(branch);
        }
        if let Some(depth) = self.options.depth {
            cmd.arg("--depth").arg(depth.to_string());
        }
        cmd.arg(source_url).arg(dest);
        cmd
    }
}

impl RepoFetcher for GitCli {
    fn fetch(&self, source_url: &str, dest: &Path) -> Result<(), MirrorError> {
        let program = &self.options.program;
        tracing::debug!(program = %program, url = %source_url, dest = %dest.display(), "cloning");

        let status = self
            .command(source_url, dest)
            .status()
            .map_err(|e| MirrorError::Clone {
                url: source_url.to_owned(),
                reason: format!("could not run '{program}': {e}"),
            })?;

        if !status.success() {
            return Err(MirrorError::Clone {
                url: source_url.to_owned(),
                reason: format!("'{program} clone' exited with {status}"),
            });
        }

        tracing::info!(dest = %dest.display(), "repository cloned");
        Ok(())
    }
}
