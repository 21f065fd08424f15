//! Attachment filename sanitizing.

/// Maximum length, in characters, of a stored attachment name.
pub const MAX_FILENAME_CHARS: usize = 200;

/// Name used when an upload carries no usable original filename.
pub const FALLBACK_FILENAME: &str = "file";

/// Maps an uploaded file's original name to the name it is stored under.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_` and the result is
/// cut to [`MAX_FILENAME_CHARS`]. A missing or empty name, or one that would
/// resolve to `.` or `..`, yields [`FALLBACK_FILENAME`].
#[must_use]
pub fn sanitize_filename(original: Option<&str>) -> String {
    let Some(original) = original.filter(|name| !name.is_empty()) else {
        return FALLBACK_FILENAME.to_owned();
    };

    let sanitized: String = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_CHARS)
        .collect();

    match sanitized.as_str() {
        "." | ".." => FALLBACK_FILENAME.to_owned(),
        _ => sanitized,
    }
}
