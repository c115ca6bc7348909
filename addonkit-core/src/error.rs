//! Error types for addonkit-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading, saving, or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure, with the path that caused it.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.addonkit/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },

    /// `config init` refused to clobber an existing file.
    #[error("config already exists at {path}; pass --force to overwrite")]
    AlreadyExists { path: PathBuf },

    /// The config parsed but describes an impossible mirror run.
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
