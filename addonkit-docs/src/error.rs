//! Error types for addonkit-docs.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while converting a source file.
#[derive(Debug, Error)]
pub enum DocError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The derived output path would overwrite the input.
    #[error("refusing to overwrite input {path}: output would have the same name")]
    OutputIsInput { path: PathBuf },
}

/// Convenience constructor for [`DocError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> DocError {
    DocError::Io {
        path: path.into(),
        source,
    }
}
