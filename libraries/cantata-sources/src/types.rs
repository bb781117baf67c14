//! Response types of the remote lookup service.

use serde::Deserialize;

/// Song detail response; only the first song is used.
#[derive(Debug, Clone, Deserialize)]
pub struct SongDetailResponse {
    #[serde(default)]
    pub songs: Vec<LookupSong>,
}

/// A song as described by the lookup service.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupSong {
    pub name: String,
    #[serde(rename = "ar", default)]
    pub artists: Vec<LookupArtist>,
    #[serde(rename = "al")]
    pub album: LookupAlbum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupAlbum {
    pub name: String,
    /// Cover art location, absolute or relative to the service
    #[serde(rename = "picUrl")]
    pub pic_url: String,
}

/// Lyrics response. Songs without lyrics may omit the field.
#[derive(Debug, Clone, Deserialize)]
pub struct LyricsResponse {
    #[serde(default)]
    pub lyric: Option<String>,
}
