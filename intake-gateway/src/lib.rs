//! HTTP gateway for the idea intake service.
//!
//! Accepts multipart idea submissions, lists stored submissions, and serves
//! the bundled frontend.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod form;
pub mod routes;
