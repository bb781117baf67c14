//! Cantata Artwork - cover art extraction and normalization
//!
//! Two halves:
//!
//! - [`LoftyCoverReader`] pulls the embedded picture out of an audio file's
//!   tags (ID3v2 APIC frames, FLAC picture blocks, MP4 `covr` atoms and so on)
//! - [`CoverNormalizer`] turns arbitrary cover bytes into the JPEG the catalog
//!   service stores
//!
//! # Example
//!
//! ```no_run
//! use cantata_artwork::{normalize_cover, LoftyCoverReader};
//! use std::path::Path;
//!
//! let reader = LoftyCoverReader::new();
//! if let Some(raw) = reader.extract(Path::new("music/track.mp3"))? {
//!     let jpeg = normalize_cover(&raw)?;
//!     println!("normalized cover: {} bytes", jpeg.len());
//! }
//! # Ok::<(), cantata_artwork::ArtworkError>(())
//! ```

mod error;
mod extractor;
mod normalize;

// Re-export public API
pub use error::{ArtworkError, Result};
pub use extractor::LoftyCoverReader;
pub use normalize::{
    normalize_cover, CoverNormalizer, ResizePolicy, DEFAULT_JPEG_QUALITY, MAX_COVER_WIDTH,
};
