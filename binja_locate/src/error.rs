//! Error types produced while probing for the Binary Ninja installation.
//!
//! Discovery itself never fails: a missing installation is reported as
//! `None`. These errors surface through [`crate::ProbeReport`] and the
//! search path export helpers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors encountered while locating the API or exporting the search path.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LocateError {
    /// The `lastrun` file exists but could not be read.
    #[error("failed to read lastrun file '{}': {source}", .path.display())]
    LastRun {
        /// Path of the `lastrun` file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The module search path contains an entry that cannot be joined.
    #[error("module search path cannot be exported: {source}")]
    JoinPaths {
        /// Underlying join failure, usually an entry containing the separator.
        #[source]
        source: std::env::JoinPathsError,
    },
}

/// Result alias used across the crate.
pub type LocateResult<T> = Result<T, LocateError>;

impl From<std::env::JoinPathsError> for LocateError {
    fn from(source: std::env::JoinPathsError) -> Self {
        Self::JoinPaths { source }
    }
}
