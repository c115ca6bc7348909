//! YAML config persistence for the mirror tool.
//!
//! # Storage layout
//!
//! ```text
//! ~/.addonkit/
//!   mirror.yaml   (optional — built-in defaults apply when absent)
//! ```
//!
//! # API pattern
//!
//! Every function that touches the home directory has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use crate::error::{io_err, ConfigError};
use crate::types::MirrorConfig;

pub const CONFIG_DIR: &str = ".addonkit";
pub const CONFIG_FILE: &str = "mirror.yaml";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.addonkit/mirror.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// `config_path_at` convenience wrapper.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load and validate a config from an explicit file.
///
/// Returns `ConfigError::NotFound` if absent, `ConfigError::Parse` (with path
/// and line context) if malformed.
pub fn load_from(path: &Path) -> Result<MirrorConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let config: MirrorConfig = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    config.validate()?;
    Ok(config)
}

/// Load `<home>/.addonkit/mirror.yaml`.
pub fn load_at(home: &Path) -> Result<MirrorConfig, ConfigError> {
    load_from(&config_path_at(home))
}

/// Load `<home>/.addonkit/mirror.yaml`, falling back to
/// [`MirrorConfig::default`] when the file does not exist.
///
/// A file that exists but fails to parse is still an error.
pub fn load_or_default_at(home: &Path) -> Result<MirrorConfig, ConfigError> {
    match load_at(home) {
        Err(ConfigError::NotFound { .. }) => Ok(MirrorConfig::default()),
        other => other,
    }
}

/// `load_or_default_at` convenience wrapper.
pub fn load_or_default() -> Result<MirrorConfig, ConfigError> {
    load_or_default_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save `config` to `<home>/.addonkit/mirror.yaml`.
///
/// Write flow: serialize → `mirror.yaml.tmp` sibling → `rename`.
pub fn save_at(home: &Path, config: &MirrorConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path_at(home);
    let dir = home.join(CONFIG_DIR);
    std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;

    let yaml = serde_yaml::to_string(config)?;
    let tmp = path.with_file_name(format!("{CONFIG_FILE}.tmp"));
    std::fs::write(&tmp, yaml).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(&path, e));
    }
    Ok(path)
}

/// Write the built-in default config unless a file already exists (or `force`).
pub fn init_at(home: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    let path = config_path_at(home);
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists { path });
    }
    save_at(home, &MirrorConfig::default())
}

/// `init_at` convenience wrapper.
pub fn init(force: bool) -> Result<PathBuf, ConfigError> {
    init_at(&home()?, force)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
