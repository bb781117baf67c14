/// Uploader configuration
use crate::error::{Result, UploaderError};
use cantata_artwork::{CoverNormalizer, ResizePolicy, DEFAULT_JPEG_QUALITY};
use cantata_catalog_client::CatalogConfig;
use cantata_sources::{LookupConfig, DEFAULT_LOOKUP_URL};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "cantata.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploaderConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_lookup")]
    pub lookup: LookupSettings,

    #[serde(default = "default_cover")]
    pub cover: CoverSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Unset means requests wait indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupSettings {
    #[serde(default = "default_lookup_url")]
    pub url: String,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoverSettings {
    #[serde(default)]
    pub resize_policy: ResizePolicy,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl UploaderConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `cantata.toml` in the working
    /// directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), reading `CANTATA_*` variables from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(UploaderError::Config(format!(
                        "config file {:?} does not exist",
                        path
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. CANTATA_CATALOG__URL
        settings = settings.add_source(
            config::Environment::with_prefix("CANTATA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_url("catalog.url", &self.catalog.url)?;
        validate_url("lookup.url", &self.lookup.url)?;

        for (key, timeout) in [
            ("catalog.timeout_secs", self.catalog.timeout_secs),
            ("lookup.timeout_secs", self.lookup.timeout_secs),
        ] {
            if timeout == Some(0) {
                return Err(UploaderError::Config(format!(
                    "{} must be positive (omit it to wait indefinitely)",
                    key
                )));
            }
        }

        if !(1..=100).contains(&self.cover.jpeg_quality) {
            return Err(UploaderError::Config(format!(
                "cover.jpeg_quality must be between 1 and 100, got {}",
                self.cover.jpeg_quality
            )));
        }

        Ok(())
    }

    pub fn normalizer(&self) -> CoverNormalizer {
        CoverNormalizer::new(self.cover.resize_policy, self.cover.jpeg_quality)
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        let mut config = CatalogConfig::new(self.catalog.url.clone()).with_normalizer(self.normalizer());
        if let Some(secs) = self.catalog.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    pub fn lookup_config(&self) -> LookupConfig {
        let mut config = LookupConfig::new(self.lookup.url.clone());
        if let Some(secs) = self.lookup.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn validate_url(key: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(UploaderError::Config(format!("{} is required", key)));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(UploaderError::Config(format!(
            "{} must start with http:// or https://, got {:?}",
            key, url
        )));
    }
    Ok(())
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        url: default_catalog_url(),
        timeout_secs: None,
    }
}

fn default_catalog_url() -> String {
    "http://127.0.0.1:29802/music".to_string()
}

fn default_lookup() -> LookupSettings {
    LookupSettings {
        url: default_lookup_url(),
        timeout_secs: None,
    }
}

fn default_lookup_url() -> String {
    DEFAULT_LOOKUP_URL.to_string()
}

fn default_cover() -> CoverSettings {
    CoverSettings {
        resize_policy: ResizePolicy::default(),
        jpeg_quality: default_jpeg_quality(),
    }
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            lookup: default_lookup(),
            cover: default_cover(),
        }
    }
}
