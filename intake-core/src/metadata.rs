//! The `metadata.txt` format: one `Label: value` line per field.

use indexmap::IndexMap;

use crate::label::display_label;

/// Name of the metadata file inside each submission directory.
pub const METADATA_FILE: &str = "metadata.txt";

/// Form field key to submitted value, in the order the form sent them.
pub type Fields = IndexMap<String, String>;

/// A submission as read back from disk: display label to value.
pub type Record = IndexMap<String, String>;

/// Renders form fields as metadata text.
///
/// Each entry becomes `<label>: <value>` with the label taken from
/// [`display_label`]. Lines are joined with `\n`; there is no trailing newline.
#[must_use]
pub fn render(fields: &Fields) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}: {value}", display_label(key)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses metadata text back into a record.
///
/// Each line splits at its first `:`; label and value are trimmed. A line
/// without a colon becomes a label with an empty value. Blank lines are
/// ignored and a repeated label keeps its last value.
#[must_use]
pub fn parse(text: &str) -> Record {
    let mut record = Record::new();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let (label, value) = line.split_once(':').unwrap_or((line, ""));
        record.insert(label.trim().to_owned(), value.trim().to_owned());
    }
    record
}
