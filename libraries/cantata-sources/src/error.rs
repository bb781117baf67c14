//! Error types for song sources.

use cantata_core::CoreError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The individual reads issued against the lookup service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStep {
    Metadata,
    Lyrics,
    Cover,
}

impl fmt::Display for LookupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupStep::Metadata => "song metadata",
            LookupStep::Lyrics => "lyrics",
            LookupStep::Cover => "cover image",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building a song bundle.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Manifest is not valid JSON or misses/mistypes a field
    #[error("Invalid manifest {}: {reason}", .path.display())]
    ManifestFormat { path: PathBuf, reason: String },

    /// A referenced file exists under none of its candidate paths
    #[error("File not found: {}", describe_candidates(.path, .alternative.as_deref()))]
    FileNotFound {
        path: PathBuf,
        alternative: Option<PathBuf>,
    },

    /// Audio file has no embedded picture to fall back on
    #[error("No cover file given and no embedded cover art in {}", .0.display())]
    NoCoverArt(PathBuf),

    /// Embedded cover art could not be read
    #[error("Failed to read embedded cover art: {0}")]
    CoverArt(#[from] CoreError),

    /// Text file is not valid UTF-8
    #[error("{} is not valid UTF-8: {source}", .path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Lookup service answered with a status other than 200
    #[error("Lookup of {step} failed with status {status}")]
    RemoteLookup { step: LookupStep, status: u16 },

    /// Lookup service answered 200 with an unusable body
    #[error("Malformed {step} response: {reason}")]
    MalformedLookup { step: LookupStep, reason: String },

    /// HTTP request to the lookup service failed
    #[error("Lookup of {step} failed: {source}")]
    Request {
        step: LookupStep,
        #[source]
        source: reqwest::Error,
    },

    /// Invalid lookup service URL
    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(String),

    /// IO error while reading local files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_candidates(path: &Path, alternative: Option<&Path>) -> String {
    match alternative {
        Some(alt) => format!("\"{}\" or \"{}\"", path.display(), alt.display()),
        None => format!("\"{}\"", path.display()),
    }
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, LoadError>;
