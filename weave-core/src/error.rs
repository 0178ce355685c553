//! Error types for conversion operations.

use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that can occur while converting a document.
///
/// The conversion itself never fails on a well-formed tree; every style
/// operation has an empty-token fallback for absent attributes.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The document holds no canvas to render.
    #[error("Document has no canvas")]
    MissingCanvas,

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
