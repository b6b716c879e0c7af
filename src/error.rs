//! Error types for the mot-eval library.

use thiserror::Error;

/// Result type for mot-eval operations.
pub type Result<T> = std::result::Result<T, MotEvalError>;

/// Error types that can occur during tracking/detection evaluation.
#[derive(Error, Debug)]
pub enum MotEvalError {
    /// Error during JSON parsing or serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during I/O operations (missing or unreadable input files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid bounding box coordinates (negative dimensions or non-finite values).
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Invalid IoU or confidence threshold.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Invalid detection or annotation record.
    #[error("Invalid detection: {0}")]
    InvalidDetection(String),

    /// A frame key that does not advance the accumulator's frame order.
    #[error("Out-of-order frame: {0}")]
    OutOfOrderFrame(String),
}
