//! Remote lookup source: metadata, lyrics and cover art by song ID.

use crate::error::{LoadError, LookupStep, Result};
use crate::types::{LookupSong, LyricsResponse, SongDetailResponse};
use cantata_core::SongBundle;
use reqwest::{Client, Response, StatusCode};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Public endpoint of the lookup service.
pub const DEFAULT_LOOKUP_URL: &str = "https://music.163.com";

/// Configuration for the lookup service.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Base URL (e.g., "https://music.163.com")
    pub url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl LookupConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_URL)
    }
}

/// Client for the remote lookup service.
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: Client,
    base_url: Url,
}

impl LookupClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LookupConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(LoadError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/');
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(LoadError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Trailing slash so relative joins stay under the base path
        let base_url = Url::parse(&format!("{}/", url))
            .map_err(|e| LoadError::InvalidUrl(e.to_string()))?;

        let mut builder = Client::builder().user_agent(format!(
            "Cantata/{} (Uploader)",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| LoadError::Request {
            step: LookupStep::Metadata,
            source,
        })?;

        Ok(Self { http, base_url })
    }

    /// Get the service URL.
    pub fn url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build a bundle for `song_id`, paired with the local `audio_path`.
    ///
    /// The audio path is checked before any request goes out and ends up in
    /// the bundle unchanged.
    pub async fn load_from_remote(&self, song_id: u64, audio_path: &Path) -> Result<SongBundle> {
        if !audio_path.is_file() {
            return Err(LoadError::FileNotFound {
                path: audio_path.to_path_buf(),
                alternative: None,
            });
        }

        let LookupSong {
            name,
            artists,
            album,
        } = self.fetch_song(song_id).await?;
        let singer = artists
            .into_iter()
            .next()
            .map(|artist| artist.name)
            .ok_or_else(|| LoadError::MalformedLookup {
                step: LookupStep::Metadata,
                reason: "song has no artists".to_string(),
            })?;

        let lyrics = self.fetch_lyrics(song_id).await?;
        debug!(song_id, lyrics = %lyrics, "Fetched lyrics");
        let cover = self.fetch_cover(&album.pic_url).await?;

        let bundle = SongBundle::new(name, singer, album.name, audio_path)
            .with_lyrics(lyrics)
            .with_cover(cover);

        info!(
            song_id,
            name = %bundle.name,
            singer = %bundle.singer,
            album = %bundle.album,
            "Loaded song from lookup service"
        );

        Ok(bundle)
    }

    /// Fetch song metadata; the first song of the response is used.
    pub async fn fetch_song(&self, song_id: u64) -> Result<LookupSong> {
        let step = LookupStep::Metadata;
        let url = self.endpoint(step, "api/v3/song/detail")?;
        debug!(url = %url, song_id, "Fetching song metadata");

        let response = self
            .http
            .get(url)
            .query(&[("c", format!("[{{id: {}}}]", song_id))])
            .send()
            .await
            .map_err(|source| LoadError::Request { step, source })?;
        let response = ensure_ok(step, response)?;

        let detail: SongDetailResponse =
            response
                .json()
                .await
                .map_err(|e| LoadError::MalformedLookup {
                    step,
                    reason: e.to_string(),
                })?;

        detail
            .songs
            .into_iter()
            .next()
            .ok_or_else(|| LoadError::MalformedLookup {
                step,
                reason: format!("no song with id {}", song_id),
            })
    }

    /// Fetch the lyrics text. Missing lyrics come back empty.
    pub async fn fetch_lyrics(&self, song_id: u64) -> Result<String> {
        let step = LookupStep::Lyrics;
        let url = self.endpoint(step, "api/song/media")?;
        debug!(url = %url, song_id, "Fetching lyrics");

        let response = self
            .http
            .get(url)
            .query(&[("id", song_id)])
            .send()
            .await
            .map_err(|source| LoadError::Request { step, source })?;
        let response = ensure_ok(step, response)?;

        let lyrics: LyricsResponse =
            response
                .json()
                .await
                .map_err(|e| LoadError::MalformedLookup {
                    step,
                    reason: e.to_string(),
                })?;

        Ok(lyrics.lyric.unwrap_or_else(|| {
            warn!(song_id, "Lookup service returned no lyrics");
            String::new()
        }))
    }

    /// Fetch raw cover bytes from `pic_url`, resolved against the service URL.
    pub async fn fetch_cover(&self, pic_url: &str) -> Result<Vec<u8>> {
        let step = LookupStep::Cover;
        let url = self.endpoint(step, pic_url)?;
        debug!(url = %url, "Fetching cover image");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Request { step, source })?;
        let response = ensure_ok(step, response)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| LoadError::Request { step, source })?;

        Ok(bytes.to_vec())
    }

    fn endpoint(&self, step: LookupStep, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| LoadError::MalformedLookup {
                step,
                reason: format!("bad URL \"{}\": {}", path, e),
            })
    }
}

fn ensure_ok(step: LookupStep, response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(response)
    } else {
        Err(LoadError::RemoteLookup {
            step,
            status: status.as_u16(),
        })
    }
}
