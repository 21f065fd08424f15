//! Error types for the gateway crate.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_store::StoreError;
use serde_json::json;
use tracing::error;

/// Errors that can occur during gateway request handling.
///
/// Every variant is reported as `500`; they differ in the body the client
/// sees.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The multipart body could not be parsed.
    #[error("invalid form: {0}")]
    InvalidForm(String),

    /// An upload could not be spooled or the submission could not be stored.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Reading submissions back from disk failed.
    #[error("listing failed: {0}")]
    Listing(#[source] StoreError),
}

impl From<MultipartError> for GatewayError {
    fn from(e: MultipartError) -> Self {
        GatewayError::InvalidForm(e.body_text())
    }
}

impl GatewayError {
    /// JSON body sent to the client for this error.
    ///
    /// Listing failures carry no detail.
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        match self {
            GatewayError::InvalidForm(detail) => {
                json!({"error": "Failed to parse form", "detail": detail})
            }
            GatewayError::Storage(e) => {
                json!({"error": "Failed to save submission", "detail": e.to_string()})
            }
            GatewayError::Listing(_) => json!({"error": "Failed to fetch ideas"}),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.body())).into_response()
    }
}
