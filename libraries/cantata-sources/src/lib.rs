//! Cantata Sources
//!
//! Producers of [`SongBundle`](cantata_core::SongBundle) values.
//!
//! # Sources
//!
//! - **Manifest**: a JSON file next to the audio, lyrics and (optionally) cover
//!   files. Missing covers are pulled from the audio file's tags.
//! - **Lookup**: song metadata, lyrics and cover art fetched from a remote
//!   music service by numeric song ID, paired with a local audio file.
//!
//! Both implement [`SongSource`] so the entry point can pick one at runtime.
//!
//! # Example
//!
//! ```ignore
//! use cantata_artwork::LoftyCoverReader;
//! use cantata_sources::{load_from_manifest, LookupClient, LookupConfig};
//! use std::path::Path;
//!
//! let bundle = load_from_manifest(Path::new("songs/x.json"), &LoftyCoverReader::new())?;
//!
//! let lookup = LookupClient::new(LookupConfig::default())?;
//! let bundle = lookup.load_from_remote(2078700726, Path::new("song.mp3")).await?;
//! ```

mod error;
mod lookup;
mod manifest;
mod source;
mod types;

pub use error::{LoadError, LookupStep, Result};
pub use lookup::{LookupClient, LookupConfig, DEFAULT_LOOKUP_URL};
pub use manifest::{load_from_manifest, resolve_path, split_subtitle, Manifest};
pub use source::{LookupSource, ManifestSource, SongSource};
pub use types::{LookupAlbum, LookupArtist, LookupSong, LyricsResponse, SongDetailResponse};
