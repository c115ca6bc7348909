//! Error types for addonkit-mirror.

use std::path::PathBuf;

use thiserror::Error;

use addonkit_core::ConfigError;

/// Errors that abort a mirror run.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The repository could not be acquired. Always fatal.
    #[error("failed to clone {url}: {reason}")]
    Clone { url: String, reason: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config handed to the run is unusable.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience constructor for [`MirrorError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> MirrorError {
    MirrorError::Io {
        path: path.into(),
        source,
    }
}
