//! Cantata Core
//!
//! Shared types and collaborator traits for the Cantata uploader.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `SongBundle`, the in-memory aggregate of one song's
//!   metadata and media, and `RemoteSongId`, the catalog's record identifier
//! - **Core Traits**: `CoverArtReader`, the seam for embedded artwork extraction
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use cantata_core::SongBundle;
//!
//! let bundle = SongBundle::new("Song", "Artist", "Album", "/music/song.mp3")
//!     .with_lyrics("la la")
//!     .with_multiline(true);
//!
//! assert!(bundle.validate().is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CoreError, Result};
pub use traits::CoverArtReader;
pub use types::{RemoteSongId, SongBundle};
