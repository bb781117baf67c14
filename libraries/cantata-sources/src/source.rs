//! Runtime-selectable song sources.

use crate::error::{LoadError, Result};
use crate::lookup::LookupClient;
use crate::manifest::load_from_manifest;
use async_trait::async_trait;
use cantata_core::{CoverArtReader, SongBundle};
use std::path::PathBuf;
use std::sync::Arc;

/// Something that can produce one song bundle.
#[async_trait]
pub trait SongSource: Send + Sync {
    /// Build the bundle.
    async fn load(&self) -> Result<SongBundle>;

    /// Human-readable description for logs.
    fn describe(&self) -> String;
}

/// Bundle from a local manifest file.
pub struct ManifestSource {
    path: PathBuf,
    covers: Arc<dyn CoverArtReader>,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>, covers: Arc<dyn CoverArtReader>) -> Self {
        Self {
            path: path.into(),
            covers,
        }
    }
}

#[async_trait]
impl SongSource for ManifestSource {
    async fn load(&self) -> Result<SongBundle> {
        // File reads and tag parsing block
        let path = self.path.clone();
        let covers = Arc::clone(&self.covers);
        tokio::task::spawn_blocking(move || load_from_manifest(&path, covers.as_ref()))
            .await
            .map_err(|e| LoadError::Io(std::io::Error::other(e)))?
    }

    fn describe(&self) -> String {
        format!("manifest {}", self.path.display())
    }
}

/// Bundle from the remote lookup service plus a local audio file.
pub struct LookupSource {
    client: LookupClient,
    song_id: u64,
    audio_path: PathBuf,
}

impl LookupSource {
    pub fn new(client: LookupClient, song_id: u64, audio_path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            song_id,
            audio_path: audio_path.into(),
        }
    }
}

#[async_trait]
impl SongSource for LookupSource {
    async fn load(&self) -> Result<SongBundle> {
        self.client
            .load_from_remote(self.song_id, &self.audio_path)
            .await
    }

    fn describe(&self) -> String {
        format!("lookup song {} ({})", self.song_id, self.client.url())
    }
}
