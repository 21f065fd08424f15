//! Multipart intake: splits a submission form into text fields and spooled
//! uploads.

use std::path::Path;

use axum::extract::Multipart;
use intake_core::Fields;
use intake_store::{UploadWriter, UploadedFile};
use tracing::debug;

use crate::error::GatewayError;

/// A parsed submission form, ready to hand to the store.
#[derive(Debug, Default)]
pub struct SubmissionForm {
    /// Text fields in arrival order. A repeated name keeps its last value.
    pub fields: Fields,
    /// Every non-empty file part, spooled to disk.
    pub files: Vec<UploadedFile>,
}

/// Drain `multipart`, streaming file parts into `upload_dir`.
///
/// A part with a filename is a file regardless of its field name. File parts
/// with an empty filename are what browsers send for an empty file input and
/// are ignored.
///
/// # Errors
/// Returns [`GatewayError::InvalidForm`] if the body is malformed, or
/// [`GatewayError::Storage`] if an upload cannot be spooled. Uploads spooled
/// before the failure are deleted.
pub async fn read_form(
    mut multipart: Multipart,
    upload_dir: &Path,
) -> Result<SubmissionForm, GatewayError> {
    let mut form = SubmissionForm::default();

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            let value = field.text().await?;
            form.fields.insert(name, value);
            continue;
        };
        if file_name.is_empty() {
            continue;
        }

        let mut writer = UploadWriter::create_in(upload_dir, Some(file_name)).await?;
        while let Some(chunk) = field.chunk().await? {
            writer.write_chunk(&chunk).await?;
        }
        let upload = writer.finish().await?;
        debug!(field = %name, size = upload.size, "spooled upload");
        form.files.push(upload);
    }

    Ok(form)
}
