//! Error types for the trend-to-job pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Errors that can occur while turning a wrapper document into job payloads.
#[derive(Error, Debug)]
pub enum FactoryError {
    /// The wrapper document does not contain a locatable trend array.
    ///
    /// Fatal for the whole extraction call: nothing downstream can be
    /// trusted once the source array is unrecoverable.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A located trend payload failed to parse as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FactoryError {
    /// Creates a MalformedInput error.
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}
