//! Cantata Catalog Client
//!
//! HTTP client for the music catalog service and the four-step upload
//! protocol that publishes a [`SongBundle`](cantata_core::SongBundle).
//!
//! # Protocol
//!
//! 1. `POST /config` creates the record and returns its ID
//! 2. `POST /lyrics` attaches the lyrics
//! 3. `POST /cover` attaches the normalized JPEG cover
//! 4. `POST /audio` attaches the audio file
//!
//! Each step waits for the previous one. A failure after step 1 leaves the
//! record on the catalog; [`UploadError::orphaned_id`] reports it.
//!
//! # Example
//!
//! ```ignore
//! use cantata_catalog_client::{CatalogClient, CatalogConfig};
//!
//! let client = CatalogClient::new(CatalogConfig::new("http://catalog.local/music"))?;
//! let id = client.upload(&bundle).await?;
//! println!("Uploaded as {}", id);
//! ```

mod client;
mod error;
mod types;
mod upload;

pub use client::CatalogClient;
pub use error::{Result, UploadError};
pub use types::{CatalogConfig, PreparedUpload, UploadStage};
pub use upload::UploadClient;
