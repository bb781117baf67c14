use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or normalizing cover art
#[derive(Debug, Error)]
pub enum ArtworkError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Lofty error
    #[error("Metadata error: {0}")]
    Lofty(#[from] lofty::error::LoftyError),

    /// Bytes are not a decodable image
    #[error("Cover image could not be decoded: {0}")]
    Decode(#[source] image::ImageError),

    /// JPEG encoding failed
    #[error("Cover image could not be encoded as JPEG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Result type for artwork operations
pub type Result<T> = std::result::Result<T, ArtworkError>;
