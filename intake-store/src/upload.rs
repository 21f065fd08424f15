//! Uploaded files awaiting storage.
//!
//! An [`UploadedFile`] owns a temporary file on disk. Dropping it deletes the
//! temporary file; storing it moves the file into a submission. Either way the
//! bytes end up in exactly one place.

use std::{
    io,
    path::{Path, PathBuf},
};

use tempfile::{PathPersistError, TempPath};
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use crate::error::{io_at, StoreError};

/// A spooled upload, owned until it is moved into a submission.
#[derive(Debug)]
#[non_exhaustive]
pub struct UploadedFile {
    /// Filename as sent by the client, if any.
    pub original_name: Option<String>,

    /// Number of bytes spooled.
    pub size: u64,

    path: TempPath,
}

impl UploadedFile {
    /// Take ownership of an existing temporary file.
    #[must_use]
    pub fn new(path: TempPath, original_name: Option<String>, size: u64) -> Self {
        Self { original_name, size, path }
    }

    /// Current on-disk location of the spooled bytes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the spooled bytes to `dest`, replacing any file already there.
    ///
    /// Tries a rename first; if that fails (for instance across filesystems)
    /// the bytes are copied and the temporary file is removed.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if neither the rename nor the copy succeeds.
    pub(crate) async fn persist_to(self, dest: &Path) -> Result<(), StoreError> {
        let target = dest.to_path_buf();
        let temp = self.path;
        let renamed = tokio::task::spawn_blocking(move || temp.persist(target))
            .await
            .map_err(|e| io_at(dest)(io::Error::other(e)))?;

        match renamed {
            Ok(()) => Ok(()),
            Err(PathPersistError { error, path }) => {
                debug!(error = %error, dest = %dest.display(), "rename failed, copying upload");
                copy_into(path, dest).await
            }
        }
    }
}

/// Copy a temporary file's bytes to `dest`, then delete the temporary file.
///
/// The temporary file is deleted even when the copy fails.
async fn copy_into(temp: TempPath, dest: &Path) -> Result<(), StoreError> {
    let copied = fs::copy(&temp, dest).await.map_err(io_at(dest));
    drop(temp);
    copied.map(|_| ())
}

/// Streams an incoming upload into a temporary file.
#[derive(Debug)]
pub struct UploadWriter {
    file: fs::File,
    path: TempPath,
    original_name: Option<String>,
    size: u64,
}

impl UploadWriter {
    /// Create a new temporary file inside `dir`.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the temporary file cannot be created.
    pub async fn create_in(dir: &Path, original_name: Option<String>) -> Result<Self, StoreError> {
        let spool_dir = dir.to_path_buf();
        let (file, path) = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix("upload-")
                .tempfile_in(spool_dir)
        })
        .await
        .map_err(|e| io_at(dir)(io::Error::other(e)))?
        .map_err(io_at(dir))?
        .into_parts();
        Ok(Self {
            file: fs::File::from_std(file),
            path,
            original_name,
            size: 0,
        })
    }

    /// Append a chunk of the upload body.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the write fails.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StoreError> {
        self.file
            .write_all(chunk)
            .await
            .map_err(io_at(PathBuf::from(&*self.path)))?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    /// Flush the spooled bytes and hand over ownership of the temporary file.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the flush fails.
    pub async fn finish(mut self) -> Result<UploadedFile, StoreError> {
        self.file
            .flush()
            .await
            .map_err(io_at(PathBuf::from(&*self.path)))?;
        drop(self.file);
        Ok(UploadedFile::new(self.path, self.original_name, self.size))
    }
}
