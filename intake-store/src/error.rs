//! Error types for the store crate.

use std::{io, path::PathBuf};

use intake_core::SubmissionId;

/// Errors that can occur while persisting or reading submissions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// A filesystem operation failed on the given path.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The fully assembled submission could not be moved out of staging.
    #[error("failed to publish submission {id}: {source}")]
    Publish {
        id: SubmissionId,
        #[source]
        source: io::Error,
    },
}

/// Builds a `map_err` adapter that tags an I/O error with the path it hit.
pub(crate) fn io_at(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> StoreError {
    let path = path.into();
    move |source| StoreError::Io { path, source }
}
