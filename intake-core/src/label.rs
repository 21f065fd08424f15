//! Display labels for submission form fields.

/// Returns the human-readable label written to the metadata file for a form
/// field key.
///
/// Keys outside the known form vocabulary are written verbatim.
#[must_use]
pub fn display_label(key: &str) -> &str {
    match key {
        "fullName" => "Name",
        "contact" => "Contact",
        "city" => "City",
        "country" => "Country",
        "grade" => "Grade",
        "field" => "Field",
        "ideaTitle" => "Idea Title",
        "ideaDesc" => "Description",
        other => other,
    }
}
