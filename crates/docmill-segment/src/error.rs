//! Error types for segmentation

use thiserror::Error;

/// Errors from the delegated (AI) segmentation path.
///
/// Every variant is recoverable: the orchestrator logs a warning and falls
/// through to the heuristic cascade. The heuristic path itself has no
/// failure mode.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// No JSON object could be carved out of the model response
    #[error("no JSON object found in model response")]
    NoJsonObject,

    /// The carved-out JSON failed to parse
    #[error("invalid JSON in model response: {0}")]
    InvalidJson(String),

    /// The JSON parsed but did not have the expected shape
    #[error("unexpected response shape: {0}")]
    InvalidShape(String),

    /// The model returned a well-formed but empty entry list
    #[error("model returned no entries")]
    EmptyEntries,
}

impl From<serde_json::Error> for SegmentError {
    fn from(e: serde_json::Error) -> Self {
        SegmentError::InvalidJson(e.to_string())
    }
}
