//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using LoadError.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while loading a vocabulary dataset.
///
/// Individual invalid records are not errors; they are dropped during
/// validation. A LoadError means the dataset itself could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed dataset: {reason}")]
    Malformed { reason: String },

    #[error("dataset root is not an array")]
    NotAnArray,
}
