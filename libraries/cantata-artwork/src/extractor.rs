use crate::error::{ArtworkError, Result};
use cantata_core::{CoreError, CoverArtReader};
use lofty::{Picture, PictureType, TaggedFileExt};
use std::path::Path;
use tracing::debug;

/// Reads embedded cover art with Lofty
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyCoverReader;

impl LoftyCoverReader {
    /// Create a new reader
    pub fn new() -> Self {
        Self
    }

    /// Extract the embedded cover from an audio file
    ///
    /// Returns `Ok(Some(bytes))` if a picture was found, `Ok(None)` if the
    /// file has no tags or no pictures, or `Err` if the file could not be read.
    ///
    /// A front cover is preferred; otherwise the first picture of the primary
    /// tag, then of any other tag, is used.
    pub fn extract(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        if !path.exists() {
            return Err(ArtworkError::FileNotFound(path.to_path_buf()));
        }

        let tagged_file = lofty::read_from_path(path)?;

        // Primary tag first so its pictures win ties
        let pictures: Vec<&Picture> = tagged_file
            .primary_tag()
            .into_iter()
            .chain(tagged_file.tags())
            .flat_map(|tag| tag.pictures())
            .collect();

        let picture = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first());

        let Some(picture) = picture else {
            debug!(file = %path.display(), "No embedded artwork");
            return Ok(None);
        };

        debug!(
            file = %path.display(),
            size = picture.data().len(),
            "Found embedded artwork"
        );

        Ok(Some(picture.data().to_vec()))
    }
}

impl CoverArtReader for LoftyCoverReader {
    fn extract_embedded_cover(&self, path: &Path) -> cantata_core::Result<Option<Vec<u8>>> {
        self.extract(path).map_err(|e| match e {
            ArtworkError::Io(io) => CoreError::Io(io),
            other => CoreError::artwork(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_nonexistent_file_returns_error() {
        let reader = LoftyCoverReader::new();
        let result = reader.extract(Path::new("/nonexistent/file.mp3"));
        assert!(matches!(result, Err(ArtworkError::FileNotFound(_))));
    }

    #[test]
    fn trait_maps_errors_into_core() {
        let reader = LoftyCoverReader::new();
        let result = reader.extract_embedded_cover(Path::new("/nonexistent/file.mp3"));
        match result {
            Err(CoreError::Artwork(msg)) => assert!(msg.contains("not found")),
            other => panic!("Expected Artwork error, got: {:?}", other),
        }
    }
}
