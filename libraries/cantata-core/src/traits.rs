/// Core traits for Cantata
use crate::error::Result;
use std::path::Path;

/// Reads artwork embedded in an audio file's tags.
///
/// Source adapters fall back to this when no standalone cover file is
/// given. Implementations must not modify the file.
pub trait CoverArtReader: Send + Sync {
    /// Return the raw bytes of the embedded cover image.
    ///
    /// Returns `Ok(None)` when the file carries no picture.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its tags cannot be parsed
    fn extract_embedded_cover(&self, path: &Path) -> Result<Option<Vec<u8>>>;
}
