//! Types for catalog requests.

use cantata_artwork::CoverNormalizer;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for connecting to the catalog service.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL the four endpoints live under (e.g., "http://catalog.local/music")
    pub url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// How covers are normalized before upload
    pub normalizer: CoverNormalizer,
}

impl CatalogConfig {
    /// Create a config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            normalizer: CoverNormalizer::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_normalizer(mut self, normalizer: CoverNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }
}

/// The steps of an upload, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UploadStage {
    Config,
    Lyrics,
    Cover,
    Audio,
}

impl UploadStage {
    /// All stages in the order they run.
    pub const ALL: [UploadStage; 4] = [
        UploadStage::Config,
        UploadStage::Lyrics,
        UploadStage::Cover,
        UploadStage::Audio,
    ];

    /// Endpoint path under the catalog base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            UploadStage::Config => "config",
            UploadStage::Lyrics => "lyrics",
            UploadStage::Cover => "cover",
            UploadStage::Audio => "audio",
        }
    }

    /// The stage after this one, or `None` after audio.
    pub fn next(&self) -> Option<UploadStage> {
        match self {
            UploadStage::Config => Some(UploadStage::Lyrics),
            UploadStage::Lyrics => Some(UploadStage::Cover),
            UploadStage::Cover => Some(UploadStage::Audio),
            UploadStage::Audio => None,
        }
    }
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

/// Local payloads of an upload, produced before anything is sent.
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    /// Normalized JPEG cover
    pub cover_jpeg: Vec<u8>,
    /// Audio file contents
    pub audio: Vec<u8>,
    /// Where the audio was read from; its name is sent with the file part
    pub audio_path: PathBuf,
}
