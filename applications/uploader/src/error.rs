/// Uploader error types
use cantata_catalog_client::UploadError;
use cantata_core::RemoteSongId;
use cantata_sources::LoadError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, UploaderError>;

#[derive(Debug, Error)]
pub enum UploaderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load song: {0}")]
    Load(#[from] LoadError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}

impl UploaderError {
    /// Catalog record left behind by a partially completed upload.
    pub fn orphaned_id(&self) -> Option<&RemoteSongId> {
        match self {
            UploaderError::Upload(e) => e.orphaned_id(),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for UploaderError {
    fn from(err: config::ConfigError) -> Self {
        UploaderError::Config(err.to_string())
    }
}
