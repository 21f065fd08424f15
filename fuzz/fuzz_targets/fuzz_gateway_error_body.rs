//! Fuzz target: JSON error payloads for malformed form bodies.
//!
//! Multipart parse messages can echo client bytes back into the `detail`
//! field; the encoded body must stay valid JSON and carry the detail intact.

#![no_main]

use intake_gateway::error::GatewayError;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let detail = String::from_utf8_lossy(data).into_owned();
    let body = GatewayError::InvalidForm(detail.clone()).body();
    let encoded = serde_json::to_vec(&body).expect("error body must serialize");
    let decoded: serde_json::Value =
        serde_json::from_slice(&encoded).expect("error body must be valid JSON");
    assert_eq!(decoded["error"], "Failed to parse form");
    assert_eq!(decoded["detail"].as_str(), Some(detail.as_str()));
});
