/// Errors produced by the `intake-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A submission ID could not be parsed as a UUID.
    #[error("invalid submission id '{value}': {reason}")]
    InvalidSubmissionId { value: String, reason: String },
}
