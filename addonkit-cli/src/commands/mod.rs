pub mod config;
pub mod doc;
pub mod mirror;

use std::path::Path;

use anyhow::{Context, Result};

use addonkit_core::config as core_config;
use addonkit_core::MirrorConfig;

/// Explicit `--config` file, else `~/.addonkit/mirror.yaml`, else built-in defaults.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<MirrorConfig> {
    match explicit {
        Some(path) => core_config::load_from(path)
            .with_context(|| format!("failed to load config '{}'", path.display())),
        None => {
            let home = dirs::home_dir().context("could not determine home directory")?;
            core_config::load_or_default_at(&home).context("failed to load ~/.addonkit/mirror.yaml")
        }
    }
}
