/// Domain types shared by source adapters and the catalog client
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// One song's metadata and media, ready for upload.
///
/// Built incrementally by a source adapter and then handed to the catalog
/// client, which only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongBundle {
    /// Track title
    pub name: String,
    /// Artist name
    pub singer: String,
    /// Album name
    pub album: String,
    /// Whether lyrics should render as multiple lines
    pub multiline: bool,
    /// Raw lyrics text; treated as opaque
    pub lyrics_text: String,
    /// Local path of the audio payload
    pub audio_file_path: PathBuf,
    /// Cover image bytes as found at the source, not yet normalized
    pub cover_image_raw: Vec<u8>,
    /// Free text shown alongside the track
    pub description: String,
}

impl SongBundle {
    /// Create a bundle with the required fields set and everything else empty.
    pub fn new(
        name: impl Into<String>,
        singer: impl Into<String>,
        album: impl Into<String>,
        audio_file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            singer: singer.into(),
            album: album.into(),
            audio_file_path: audio_file_path.into(),
            ..Self::default()
        }
    }

    /// Set the lyrics text.
    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics_text = lyrics.into();
        self
    }

    /// Set the raw cover image bytes.
    pub fn with_cover(mut self, cover: Vec<u8>) -> Self {
        self.cover_image_raw = cover;
        self
    }

    /// Set whether lyrics are multi-line.
    pub fn with_multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the fields the catalog requires.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidBundle` if the title is blank
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid_bundle("track name cannot be empty"));
        }
        Ok(())
    }
}

/// Identifier of a catalog record, as returned by the catalog's config step.
///
/// The value is kept verbatim: string IDs as-is, numeric IDs in their JSON
/// text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteSongId(String);

impl RemoteSongId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extract the identifier from a JSON value.
    ///
    /// Only strings and numbers are identifiers; anything else yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self(s.clone())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Borrow the identifier as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteSongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_bundle_has_defaults() {
        let bundle = SongBundle::new("X", "S", "A", "a.mp3");
        assert_eq!(bundle.name, "X");
        assert_eq!(bundle.singer, "S");
        assert_eq!(bundle.album, "A");
        assert!(!bundle.multiline);
        assert!(bundle.lyrics_text.is_empty());
        assert!(bundle.cover_image_raw.is_empty());
        assert!(bundle.description.is_empty());
        assert_eq!(bundle.audio_file_path, PathBuf::from("a.mp3"));
    }

    #[test]
    fn builder_setters() {
        let bundle = SongBundle::new("X", "S", "A", "a.mp3")
            .with_lyrics("la la")
            .with_cover(vec![1, 2, 3])
            .with_multiline(true)
            .with_description("live");

        assert_eq!(bundle.lyrics_text, "la la");
        assert_eq!(bundle.cover_image_raw, vec![1, 2, 3]);
        assert!(bundle.multiline);
        assert_eq!(bundle.description, "live");
    }

    #[test]
    fn blank_name_fails_validation() {
        let bundle = SongBundle::new("   ", "S", "A", "a.mp3");
        assert!(matches!(
            bundle.validate(),
            Err(CoreError::InvalidBundle(_))
        ));
        assert!(SongBundle::new("X", "", "", "a.mp3").validate().is_ok());
    }

    #[test]
    fn remote_id_from_string_and_number() {
        assert_eq!(
            RemoteSongId::from_json(&json!("abc-1")).map(|id| id.to_string()),
            Some("abc-1".to_string())
        );
        assert_eq!(
            RemoteSongId::from_json(&json!(42)).map(|id| id.to_string()),
            Some("42".to_string())
        );
    }

    #[test]
    fn remote_id_rejects_other_json() {
        assert!(RemoteSongId::from_json(&json!(null)).is_none());
        assert!(RemoteSongId::from_json(&json!(true)).is_none());
        assert!(RemoteSongId::from_json(&json!({"id": 1})).is_none());
        assert!(RemoteSongId::from_json(&json!([1])).is_none());
    }

    #[test]
    fn remote_id_serializes_as_plain_string() {
        let id = RemoteSongId::new("7");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("7"));
    }
}
