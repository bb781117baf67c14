//! Main catalog client.

use crate::error::{Result, UploadError};
use crate::types::{CatalogConfig, PreparedUpload, UploadStage};
use crate::upload::UploadClient;
use cantata_artwork::CoverNormalizer;
use cantata_core::{RemoteSongId, SongBundle};
use reqwest::Client;
use tracing::{debug, info};

/// Client for the music catalog service.
///
/// # Example
///
/// ```ignore
/// use cantata_catalog_client::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::new("http://catalog.local/music"))?;
/// let prepared = client.prepare(&bundle).await?;
/// println!("cover: {} bytes", prepared.cover_jpeg.len());
///
/// let id = client.upload(&bundle).await?;
/// ```
pub struct CatalogClient {
    http: Client,
    url: String,
    normalizer: CoverNormalizer,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(UploadError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(UploadError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // No timeout unless configured: a slow catalog is waited on
        let mut builder = Client::builder().user_agent(format!(
            "Cantata/{} (Uploader)",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| UploadError::Request {
            stage: UploadStage::Config,
            id: None,
            source,
        })?;

        Ok(Self {
            http,
            url,
            normalizer: config.normalizer,
        })
    }

    /// Get the catalog URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get an upload client for issuing individual protocol steps.
    pub fn uploader(&self) -> UploadClient<'_> {
        UploadClient::new(&self.http, &self.url)
    }

    /// Produce the local payloads of an upload without sending anything.
    ///
    /// Validates the bundle, normalizes the cover and reads the audio file.
    /// Every local failure surfaces here, before the catalog is touched.
    pub async fn prepare(&self, bundle: &SongBundle) -> Result<PreparedUpload> {
        bundle.validate()?;

        let cover_jpeg = self
            .normalizer
            .normalize(&bundle.cover_image_raw)
            .map_err(UploadError::CoverDecode)?;

        let audio = tokio::fs::read(&bundle.audio_file_path)
            .await
            .map_err(|source| UploadError::AudioRead {
                path: bundle.audio_file_path.clone(),
                source,
            })?;

        debug!(
            name = %bundle.name,
            cover_size = cover_jpeg.len(),
            audio_size = audio.len(),
            "Prepared upload"
        );

        Ok(PreparedUpload {
            cover_jpeg,
            audio,
            audio_path: bundle.audio_file_path.clone(),
        })
    }

    /// Upload a bundle through all four protocol steps.
    ///
    /// Returns the catalog ID on success. Nothing is rolled back on failure.
    pub async fn upload(&self, bundle: &SongBundle) -> Result<RemoteSongId> {
        let prepared = self.prepare(bundle).await?;
        let id = self.uploader().upload_prepared(bundle, prepared).await?;

        info!(name = %bundle.name, id = %id, "Upload succeeded");

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        // Valid URLs
        assert!(CatalogClient::new(CatalogConfig::new("https://example.com")).is_ok());
        assert!(CatalogClient::new(CatalogConfig::new("http://localhost:8080/music")).is_ok());

        // Invalid URLs
        assert!(CatalogClient::new(CatalogConfig::new("")).is_err());
        assert!(CatalogClient::new(CatalogConfig::new("not-a-url")).is_err());
        assert!(CatalogClient::new(CatalogConfig::new("ftp://example.com")).is_err());
    }

    #[test]
    fn test_url_normalization() {
        let client =
            CatalogClient::new(CatalogConfig::new("https://example.com/music/")).expect("valid url");

        // URL should have trailing slash removed
        assert_eq!(client.url(), "https://example.com/music");
    }
}
