//! Filesystem persistence for the idea intake service.
//!
//! Each submission is a directory named by its ID holding a `metadata.txt`
//! and an `Attachments/` folder. Submissions are assembled in a staging area
//! and published with a single rename.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod fs_store;
pub mod store;
pub mod upload;

pub use config::StoreConfig;
pub use error::StoreError;
pub use fs_store::FsSubmissionStore;
pub use store::SubmissionStore;
pub use upload::{UploadWriter, UploadedFile};
