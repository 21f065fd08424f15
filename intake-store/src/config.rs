//! Storage layout configuration.

use std::path::PathBuf;

use intake_core::SubmissionId;

/// Name of the attachments subdirectory inside each submission directory.
pub const ATTACHMENTS_DIR: &str = "Attachments";

/// Directory under the root where submissions are assembled before publishing.
pub const STAGING_DIR: &str = ".staging";

/// Directory under the root where incoming uploads are spooled.
pub const UPLOAD_DIR: &str = ".uploads";

/// Where submissions live on disk.
///
/// Every path the store touches is derived from `root`, so the spool and
/// staging areas share a filesystem with the published submissions and
/// moves between them are plain renames.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct StoreConfig {
    /// Directory holding one subdirectory per submission.
    pub root: PathBuf,
}

impl StoreConfig {
    /// Create a config rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Published location of a submission: `<root>/<id>`.
    #[must_use]
    pub fn submission_dir(&self, id: SubmissionId) -> PathBuf {
        self.root.join(id.to_string())
    }

    /// Assembly location of a submission: `<root>/.staging/<id>`.
    #[must_use]
    pub fn staging_dir(&self, id: SubmissionId) -> PathBuf {
        self.root.join(STAGING_DIR).join(id.to_string())
    }

    /// Spool directory for uploads that have not been stored yet.
    #[must_use]
    pub fn upload_dir(&self) -> PathBuf {
        self.root.join(UPLOAD_DIR)
    }
}
