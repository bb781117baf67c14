/// Core error types for Cantata
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Cantata
#[derive(Error, Debug)]
pub enum CoreError {
    /// Bundle failed validation before upload
    #[error("Invalid song bundle: {0}")]
    InvalidBundle(String),

    /// Embedded artwork could not be read
    #[error("Artwork error: {0}")]
    Artwork(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create an invalid bundle error
    pub fn invalid_bundle(msg: impl Into<String>) -> Self {
        Self::InvalidBundle(msg.into())
    }

    /// Create an artwork error
    pub fn artwork(msg: impl Into<String>) -> Self {
        Self::Artwork(msg.into())
    }
}
