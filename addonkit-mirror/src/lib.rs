//! # addonkit-mirror
//!
//! Clone a repository into a scratch directory and mirror its working tree
//! into every configured destination.
//!
//! Call [`mirror`] with a [`MirrorConfig`](addonkit_core::MirrorConfig) and a
//! [`RepoFetcher`]; the returned [`MirrorReport`] describes what happened at
//! each destination. Only a failed clone is an `Err` — destination-level
//! problems are recorded in the report and the run moves on.

pub mod clean;
pub mod copy;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod report;
pub mod scratch;

pub use error::MirrorError;
pub use fetch::{GitCli, RepoFetcher};
pub use pipeline::{mirror, MirrorOptions};
pub use report::{DestinationReport, DestinationStatus, ItemFailure, MirrorReport};
pub use scratch::Scratch;
