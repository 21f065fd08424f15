//! Fuzz target: parsing of `metadata.txt` contents.
//!
//! Metadata files live on disk and may be edited by hand, so the parser must
//! accept any text without panicking.

#![no_main]

use intake_core::metadata;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let record = metadata::parse(&text);
    for (label, value) in &record {
        assert_eq!(label.trim(), label);
        assert_eq!(value.trim(), value);
    }
});
