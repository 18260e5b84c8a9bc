use thiserror::Error;

use crate::file::FileAccessError;

/// Errors raised by the formatting functions.
#[derive(Debug, Error)]
pub enum VisualizerError {
    /// The argument is not the kind of object the function expects.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// The argument has the right kind but unusable content.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The file-access collaborator could not resolve a file.
    #[error(transparent)]
    File(#[from] FileAccessError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
