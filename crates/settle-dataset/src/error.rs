//! Error types for dataset normalization.

use thiserror::Error;

/// Errors raised while normalizing an activity export.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of activity records at the top level")]
    NotAnArray,

    #[error("Activity record {index} is not a JSON object")]
    NotAnObject { index: usize },
}
