//! The four-step upload protocol.

use crate::error::{Result, UploadError};
use crate::types::{PreparedUpload, UploadStage};
use cantata_core::{RemoteSongId, SongBundle};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Issues the individual catalog upload steps.
pub struct UploadClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> UploadClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Run the protocol with payloads that were already prepared.
    ///
    /// Steps run strictly in order; the first failure stops the sequence.
    pub async fn upload_prepared(
        &self,
        bundle: &SongBundle,
        prepared: PreparedUpload,
    ) -> Result<RemoteSongId> {
        let id = self.create_config(bundle).await?;

        let result = async {
            self.set_lyrics(&id, &bundle.lyrics_text).await?;
            self.set_cover(&id, prepared.cover_jpeg).await?;
            self.set_audio(&id, prepared.audio, &prepared.audio_path)
                .await
        }
        .await;

        if let Err(e) = &result {
            warn!(
                id = %id,
                stage = ?e.stage(),
                "Upload aborted; config record left on the catalog"
            );
        }

        result.map(|()| id)
    }

    /// Step 1: create the config record and return its ID.
    pub async fn create_config(&self, bundle: &SongBundle) -> Result<RemoteSongId> {
        let stage = UploadStage::Config;
        let form = [
            ("name", bundle.name.as_str()),
            ("singer", bundle.singer.as_str()),
            ("album", bundle.album.as_str()),
            ("multiline", python_bool(bundle.multiline)),
            ("description", bundle.description.as_str()),
        ];

        let response = self
            .send(stage, None, self.post(stage).form(&form))
            .await?;
        if response.status() != StatusCode::OK {
            return Err(UploadError::ConfigUpload {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| UploadError::Request {
                stage,
                id: None,
                source,
            })?;

        let id = parse_config_id(&body)?;
        debug!(id = %id, name = %bundle.name, "Config record created");
        Ok(id)
    }

    /// Step 2: attach lyrics.
    pub async fn set_lyrics(&self, id: &RemoteSongId, lyrics: &str) -> Result<()> {
        let stage = UploadStage::Lyrics;
        let form = [("id", id.as_str()), ("lyrics", lyrics)];

        let response = self
            .send(stage, Some(id), self.post(stage).form(&form))
            .await?;
        if response.status() != StatusCode::OK {
            return Err(UploadError::LyricsUpload {
                status: response.status().as_u16(),
                id: id.clone(),
            });
        }

        debug!(id = %id, "Lyrics uploaded");
        Ok(())
    }

    /// Step 3: attach the normalized JPEG cover.
    pub async fn set_cover(&self, id: &RemoteSongId, cover_jpeg: Vec<u8>) -> Result<()> {
        let stage = UploadStage::Cover;
        let size = cover_jpeg.len();
        let part = Part::bytes(cover_jpeg)
            .file_name("cover.jpg")
            .mime_str("image/jpeg")
            .map_err(|source| UploadError::Request {
                stage,
                id: Some(id.clone()),
                source,
            })?;
        let form = Form::new().text("id", id.to_string()).part("image", part);

        let response = self
            .send(stage, Some(id), self.post(stage).multipart(form))
            .await?;
        if response.status() != StatusCode::OK {
            return Err(UploadError::CoverUpload {
                status: response.status().as_u16(),
                id: id.clone(),
            });
        }

        debug!(id = %id, size, "Cover uploaded");
        Ok(())
    }

    /// Step 4: attach the audio file contents.
    pub async fn set_audio(&self, id: &RemoteSongId, audio: Vec<u8>, path: &Path) -> Result<()> {
        let stage = UploadStage::Audio;
        let size = audio.len();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();
        let part = Part::bytes(audio)
            .file_name(file_name.clone())
            .mime_str(mime_type_for_file(path))
            .map_err(|source| UploadError::Request {
                stage,
                id: Some(id.clone()),
                source,
            })?;
        let form = Form::new().text("id", id.to_string()).part("audio", part);

        let response = self
            .send(stage, Some(id), self.post(stage).multipart(form))
            .await?;
        if response.status() != StatusCode::OK {
            return Err(UploadError::AudioUpload {
                status: response.status().as_u16(),
                id: id.clone(),
            });
        }

        debug!(id = %id, file = %file_name, size, "Audio uploaded");
        Ok(())
    }

    fn post(&self, stage: UploadStage) -> RequestBuilder {
        self.http
            .post(format!("{}/{}", self.base_url, stage.endpoint()))
    }

    async fn send(
        &self,
        stage: UploadStage,
        id: Option<&RemoteSongId>,
        request: RequestBuilder,
    ) -> Result<Response> {
        debug!(stage = %stage, "Sending upload step");

        let response = request
            .send()
            .await
            .map_err(|source| UploadError::Request {
                stage,
                id: id.cloned(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            debug!(stage = %stage, status = response.status().as_u16(), "Catalog rejected step");
        }

        Ok(response)
    }
}

/// Read the record ID out of a `/config` response body.
fn parse_config_id(body: &str) -> Result<RemoteSongId> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| UploadError::Protocol(format!("response is not JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| UploadError::Protocol("response is not a JSON object".to_string()))?;

    let id = object
        .get("id")
        .ok_or_else(|| UploadError::Protocol("response has no \"id\" field".to_string()))?;

    RemoteSongId::from_json(id)
        .ok_or_else(|| UploadError::Protocol(format!("\"id\" is not a string or number: {}", id)))
}

/// Booleans as the catalog has always received them.
fn python_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Get MIME type for audio file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("wav") => "audio/wav",
        Some("m4a") | Some("aac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
