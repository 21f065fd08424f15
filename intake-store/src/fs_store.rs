//! Filesystem-backed submission store.
//!
//! Layout under the configured root:
//!
//! ```text
//! <root>/<id>/metadata.txt
//! <root>/<id>/Attachments/<sanitized-name>
//! <root>/.staging/<id>/...   (assembly area, never listed)
//! <root>/.uploads/upload-*   (spooled uploads, never listed)
//! ```

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use intake_core::{metadata, sanitize_filename, Fields, Record, SubmissionId, METADATA_FILE};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::{
    config::{ATTACHMENTS_DIR, STAGING_DIR},
    error::io_at,
    StoreConfig, StoreError, SubmissionStore, UploadedFile,
};

/// Stores submissions as plain directories under a root path.
#[derive(Debug, Clone)]
pub struct FsSubmissionStore {
    config: StoreConfig,
    upload_dir: PathBuf,
}

impl FsSubmissionStore {
    /// Create a store without touching the filesystem.
    ///
    /// Use [`FsSubmissionStore::open`] to also create the root, staging and
    /// upload directories.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        let upload_dir = config.upload_dir();
        Self { config, upload_dir }
    }

    /// Create a store and make sure its directories exist.
    ///
    /// Staging directories left by requests that never finished are removed.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if a directory cannot be created or the
    /// staging area cannot be read.
    pub async fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let store = Self::new(config);
        let staging_root = store.config.root.join(STAGING_DIR);
        for dir in [
            store.config.root.clone(),
            staging_root.clone(),
            store.upload_dir.clone(),
        ] {
            fs::create_dir_all(&dir).await.map_err(io_at(&dir))?;
        }

        let mut leftovers = fs::read_dir(&staging_root)
            .await
            .map_err(io_at(&staging_root))?;
        let mut cleared = 0usize;
        while let Some(entry) = leftovers
            .next_entry()
            .await
            .map_err(io_at(&staging_root))?
        {
            Self::discard(&entry.path()).await;
            cleared += 1;
        }
        if cleared > 0 {
            info!(count = cleared, "cleared abandoned staging directories");
        }
        Ok(store)
    }

    /// Assemble and publish a submission under a caller-chosen ID.
    async fn store_as(
        &self,
        id: SubmissionId,
        fields: &Fields,
        files: Vec<UploadedFile>,
    ) -> Result<(), StoreError> {
        let staging = self.config.staging_dir(id);

        // Any uploads not yet moved are dropped with the error, deleting them.
        if let Err(e) = Self::assemble(&staging, fields, files).await {
            Self::discard(&staging).await;
            return Err(e);
        }

        let target = self.config.submission_dir(id);
        if let Err(source) = fs::rename(&staging, &target).await {
            Self::discard(&staging).await;
            return Err(StoreError::Publish { id, source });
        }
        Ok(())
    }

    /// Write the metadata file and move every upload into `staging`.
    async fn assemble(
        staging: &Path,
        fields: &Fields,
        files: Vec<UploadedFile>,
    ) -> Result<(), StoreError> {
        let attachments = staging.join(ATTACHMENTS_DIR);
        fs::create_dir_all(&attachments)
            .await
            .map_err(io_at(&attachments))?;

        let metadata_path = staging.join(METADATA_FILE);
        fs::write(&metadata_path, metadata::render(fields))
            .await
            .map_err(io_at(&metadata_path))?;

        for file in files {
            let name = sanitize_filename(file.original_name.as_deref());
            let dest = attachments.join(&name);
            debug!(name = %name, size = file.size, "moving attachment");
            file.persist_to(&dest).await?;
        }
        Ok(())
    }

    /// Best-effort removal of a staging directory.
    async fn discard(staging: &Path) {
        let removed = match fs::metadata(staging).await {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(staging).await,
            Ok(_) => fs::remove_file(staging).await,
            Err(e) => Err(e),
        };
        match removed {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %staging.display(), error = %e, "failed to remove staging directory");
            }
        }
    }
}

#[async_trait]
impl SubmissionStore for FsSubmissionStore {
    async fn store(
        &self,
        fields: Fields,
        files: Vec<UploadedFile>,
    ) -> Result<SubmissionId, StoreError> {
        let id = SubmissionId::new();
        let attachment_count = files.len();
        self.store_as(id, &fields, files).await?;

        info!(
            id = %id,
            fields = fields.len(),
            attachments = attachment_count,
            "submission stored"
        );
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let root = &self.config.root;
        let mut entries = fs::read_dir(root).await.map_err(io_at(root))?;
        let mut records = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(io_at(root))? {
            let dir = entry.path();
            match fs::metadata(&dir).await {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => continue,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(io_at(&dir)(e)),
            }

            let metadata_path = dir.join(METADATA_FILE);
            let bytes = match fs::read(&metadata_path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(io_at(metadata_path)(e)),
            };
            // Hand-edited files may not be UTF-8; undecodable bytes become U+FFFD.
            records.push(metadata::parse(&String::from_utf8_lossy(&bytes)));
        }

        debug!(count = records.len(), "listed submissions");
        Ok(records)
    }

    fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}
