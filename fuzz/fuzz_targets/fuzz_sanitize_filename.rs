//! Fuzz target: attachment filename sanitizing.
//!
//! Whatever a client sends as a filename, the stored name must stay inside
//! the attachments directory.

#![no_main]

use intake_core::filename::{sanitize_filename, MAX_FILENAME_CHARS};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|name: &str| {
    let out = sanitize_filename(Some(name));
    assert!(!out.is_empty());
    assert!(out != "." && out != "..");
    assert!(out.len() <= MAX_FILENAME_CHARS);
    assert!(out
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-')));
});
