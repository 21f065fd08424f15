//! Core types for the idea intake service.
//!
//! Defines submission identifiers, the field display-label table, attachment
//! filename sanitizing, and the plain-text metadata format shared by the
//! store and the HTTP gateway.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod filename;
pub mod id;
pub mod label;
pub mod metadata;

pub use error::CoreError;
pub use filename::sanitize_filename;
pub use id::SubmissionId;
pub use label::display_label;
pub use metadata::{Fields, Record, METADATA_FILE};
