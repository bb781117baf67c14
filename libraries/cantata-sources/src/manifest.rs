//! Song manifests: a small JSON file describing one song and its media files.
//!
//! ```json
//! {
//!     "title": "X",
//!     "subTitle": "Singer - Album",
//!     "audioFilePath": "a.mp3",
//!     "lyricsFilePath": "l.txt",
//!     "multilineLyrics": true,
//!     "coverFilePath": "cover.png"
//! }
//! ```

use crate::error::{LoadError, Result};
use cantata_core::{CoverArtReader, SongBundle};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk manifest layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub title: String,
    /// `"Singer - Album"`
    pub sub_title: String,
    pub audio_file_path: String,
    pub lyrics_file_path: String,
    #[serde(default)]
    pub multiline_lyrics: bool,
    #[serde(default)]
    pub cover_file_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Build a bundle from a manifest file.
///
/// Relative paths inside the manifest are looked up next to the manifest
/// first. Without a `coverFilePath` the cover comes from the audio file's
/// embedded artwork via `covers`.
pub fn load_from_manifest(path: &Path, covers: &dyn CoverArtReader) -> Result<SongBundle> {
    let raw = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
            alternative: None,
        },
        _ => LoadError::Io(e),
    })?;

    let manifest: Manifest = serde_json::from_slice(&raw).map_err(|e| LoadError::ManifestFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if manifest.title.trim().is_empty() {
        return Err(LoadError::ManifestFormat {
            path: path.to_path_buf(),
            reason: "title cannot be empty".to_string(),
        });
    }

    let (singer, album) =
        split_subtitle(&manifest.sub_title).ok_or_else(|| LoadError::ManifestFormat {
            path: path.to_path_buf(),
            reason: format!(
                "subTitle \"{}\" is not in \"Singer - Album\" form",
                manifest.sub_title
            ),
        })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let audio_file_path = resolve_path(&manifest.audio_file_path, base_dir)?;

    let cover = match &manifest.cover_file_path {
        Some(cover_path) => {
            let cover_path = resolve_path(cover_path, base_dir)?;
            debug!(file = %cover_path.display(), "Reading cover file");
            std::fs::read(&cover_path)?
        }
        None => {
            debug!(file = %audio_file_path.display(), "Reading embedded cover");
            covers
                .extract_embedded_cover(&audio_file_path)?
                .ok_or_else(|| LoadError::NoCoverArt(audio_file_path.clone()))?
        }
    };

    let lyrics_path = resolve_path(&manifest.lyrics_file_path, base_dir)?;
    let lyrics = read_utf8(&lyrics_path)?;

    let bundle = SongBundle::new(manifest.title, singer, album, audio_file_path)
        .with_lyrics(lyrics)
        .with_cover(cover)
        .with_multiline(manifest.multiline_lyrics)
        .with_description(manifest.description.unwrap_or_default());

    info!(
        manifest = %path.display(),
        name = %bundle.name,
        singer = %bundle.singer,
        album = %bundle.album,
        "Loaded song from manifest"
    );

    Ok(bundle)
}

/// Split `"Singer - Album"` on the first `-`, trimming both halves.
///
/// Returns `None` when there is no `-`.
pub fn split_subtitle(sub_title: &str) -> Option<(String, String)> {
    let (singer, album) = sub_title.split_once('-')?;
    Some((singer.trim().to_string(), album.trim().to_string()))
}

/// Locate a file named in a manifest.
///
/// Tries `base_dir/given` first, then `given` as-is. Absolute paths only
/// have one candidate.
pub fn resolve_path(given: &str, base_dir: &Path) -> Result<PathBuf> {
    let as_given = PathBuf::from(given);
    let in_base_dir = base_dir.join(&as_given);

    if in_base_dir.is_file() {
        return Ok(in_base_dir);
    }
    if as_given.is_file() {
        return Ok(as_given);
    }

    let alternative = (as_given != in_base_dir).then_some(as_given);
    Err(LoadError::FileNotFound {
        path: in_base_dir,
        alternative,
    })
}

fn read_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|source| LoadError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_subtitle_trims() {
        assert_eq!(
            split_subtitle("A - B"),
            Some(("A".to_string(), "B".to_string()))
        );
        assert_eq!(
            split_subtitle(" A  -  B "),
            Some(("A".to_string(), "B".to_string()))
        );
    }

    #[test]
    fn test_split_subtitle_uses_first_dash() {
        assert_eq!(
            split_subtitle("Jay-Z - The Blueprint"),
            Some(("Jay".to_string(), "Z - The Blueprint".to_string()))
        );
    }

    #[test]
    fn test_split_subtitle_without_dash() {
        assert_eq!(split_subtitle("Singer Album"), None);
        assert_eq!(split_subtitle(""), None);
    }

    #[test]
    fn test_resolve_prefers_base_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.mp3"), b"audio").unwrap();

        let resolved = resolve_path("a.mp3", dir.path()).unwrap();
        assert_eq!(resolved, dir.path().join("a.mp3"));
    }

    #[test]
    fn test_resolve_falls_back_to_given_path() {
        // Tests run from the crate root, where Cargo.toml exists
        let base = TempDir::new().unwrap();
        let resolved = resolve_path("Cargo.toml", base.path()).unwrap();
        assert_eq!(resolved, PathBuf::from("Cargo.toml"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let base = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let file = other.path().join("l.txt");
        std::fs::write(&file, b"lyrics").unwrap();

        let resolved = resolve_path(file.to_str().unwrap(), base.path()).unwrap();
        assert_eq!(resolved, file);
    }

    #[test]
    fn test_resolve_reports_both_candidates() {
        let dir = TempDir::new().unwrap();
        match resolve_path("missing.mp3", dir.path()) {
            Err(LoadError::FileNotFound { path, alternative }) => {
                assert_eq!(path, dir.path().join("missing.mp3"));
                assert_eq!(alternative, Some(PathBuf::from("missing.mp3")));
            }
            other => panic!("Expected FileNotFound, got: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_ignores_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("covers")).unwrap();
        assert!(resolve_path("covers", dir.path()).is_err());
    }

    #[test]
    fn test_read_utf8_rejects_invalid_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("l.txt");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        assert!(matches!(read_utf8(&path), Err(LoadError::Encoding { .. })));
    }
}
