//! Submission store abstraction trait.
//!
//! The HTTP layer talks to storage only through [`SubmissionStore`], so the
//! filesystem backend can be swapped out in tests.

use std::path::Path;

use async_trait::async_trait;
use intake_core::{Fields, Record, SubmissionId};

use crate::{StoreError, UploadedFile};

/// Persistence for idea submissions.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist one submission and return its freshly generated ID.
    ///
    /// Takes ownership of every upload: each is either moved into the
    /// submission or deleted when the call fails.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if a directory, the metadata file, or an
    /// attachment cannot be written. Returns [`StoreError::Publish`] if the
    /// assembled submission cannot be made visible.
    async fn store(
        &self,
        fields: Fields,
        files: Vec<UploadedFile>,
    ) -> Result<SubmissionId, StoreError>;

    /// Read back every published submission.
    ///
    /// Entries without a metadata file are skipped.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] on any other read failure; no partial list
    /// is returned.
    async fn list_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Directory where callers should spool uploads before calling
    /// [`SubmissionStore::store`].
    fn upload_dir(&self) -> &Path;
}
