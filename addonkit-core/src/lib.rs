//! addonkit core library — mirror configuration types, config persistence, errors.
//!
//! - [`types`] — [`MirrorConfig`] and [`GitOptions`]
//! - [`error`] — [`ConfigError`]
//! - [`config`] — load / save of `~/.addonkit/mirror.yaml`

pub mod config;
pub mod error;
pub mod types;

pub use error::ConfigError;
pub use types::{GitOptions, MirrorConfig};
