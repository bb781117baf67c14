//! Error types for catalog uploads.

use crate::types::UploadStage;
use cantata_artwork::ArtworkError;
use cantata_core::{CoreError, RemoteSongId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while uploading a song to the catalog.
///
/// Variants carrying an `id` mean the config record was created and is left
/// behind on the catalog.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Invalid catalog URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Bundle is missing required fields
    #[error(transparent)]
    InvalidBundle(#[from] CoreError),

    /// Cover bytes are not a usable image
    #[error("Cover image could not be normalized: {0}")]
    CoverDecode(#[source] ArtworkError),

    /// Audio file could not be read
    #[error("Failed to read audio file {}: {source}", .path.display())]
    AudioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `/config` answered with a status other than 200
    #[error("Config upload failed, status-code={status}")]
    ConfigUpload { status: u16 },

    /// `/config` answered 200 without a usable identifier
    #[error("Malformed config response: {0}")]
    Protocol(String),

    /// `/lyrics` answered with a status other than 200
    #[error("Lyrics upload for song {id} failed, status-code={status}")]
    LyricsUpload { status: u16, id: RemoteSongId },

    /// `/cover` answered with a status other than 200
    #[error("Cover upload for song {id} failed, status-code={status}")]
    CoverUpload { status: u16, id: RemoteSongId },

    /// `/audio` answered with a status other than 200
    #[error("Audio upload for song {id} failed, status-code={status}")]
    AudioUpload { status: u16, id: RemoteSongId },

    /// HTTP request failed before a response arrived
    #[error("{stage} request failed: {source}")]
    Request {
        stage: UploadStage,
        id: Option<RemoteSongId>,
        #[source]
        source: reqwest::Error,
    },
}

impl UploadError {
    /// The protocol step that failed, if the failure happened on the wire.
    pub fn stage(&self) -> Option<UploadStage> {
        match self {
            UploadError::ConfigUpload { .. } | UploadError::Protocol(_) => {
                Some(UploadStage::Config)
            }
            UploadError::LyricsUpload { .. } => Some(UploadStage::Lyrics),
            UploadError::CoverUpload { .. } => Some(UploadStage::Cover),
            UploadError::AudioUpload { .. } => Some(UploadStage::Audio),
            UploadError::Request { stage, .. } => Some(*stage),
            UploadError::InvalidUrl(_)
            | UploadError::InvalidBundle(_)
            | UploadError::CoverDecode(_)
            | UploadError::AudioRead { .. } => None,
        }
    }

    /// ID of a config record the failed upload left on the catalog.
    pub fn orphaned_id(&self) -> Option<&RemoteSongId> {
        match self {
            UploadError::LyricsUpload { id, .. }
            | UploadError::CoverUpload { id, .. }
            | UploadError::AudioUpload { id, .. } => Some(id),
            UploadError::Request { id, .. } => id.as_ref(),
            _ => None,
        }
    }

    /// HTTP status of a rejected step.
    pub fn status(&self) -> Option<u16> {
        match self {
            UploadError::ConfigUpload { status }
            | UploadError::LyricsUpload { status, .. }
            | UploadError::CoverUpload { status, .. }
            | UploadError::AudioUpload { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, UploadError>;
