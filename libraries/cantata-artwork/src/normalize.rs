//! Cover normalization: decode, resize, drop alpha, re-encode as JPEG.

use crate::error::{ArtworkError, Result};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Covers wider than this are scaled down.
pub const MAX_COVER_WIDTH: u32 = 1000;

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// How oversized covers are scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Force the cover to exactly `MAX_COVER_WIDTH` x `MAX_COVER_WIDTH`,
    /// whatever its aspect ratio. This is what the catalog has always received.
    #[default]
    Stretch,
    /// Scale to `MAX_COVER_WIDTH` wide, keeping the aspect ratio.
    FitWithin,
}

/// Turns arbitrary cover bytes into a catalog-ready JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverNormalizer {
    resize_policy: ResizePolicy,
    jpeg_quality: u8,
}

impl Default for CoverNormalizer {
    fn default() -> Self {
        Self {
            resize_policy: ResizePolicy::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl CoverNormalizer {
    /// Create a normalizer. Quality is clamped to 1..=100.
    pub fn new(resize_policy: ResizePolicy, jpeg_quality: u8) -> Self {
        Self {
            resize_policy,
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize_policy
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Normalize raw cover bytes.
    ///
    /// Any format the `image` crate can decode is accepted. The output is
    /// always a baseline JPEG without alpha.
    pub fn normalize(&self, raw: &[u8]) -> Result<Vec<u8>> {
        let decoded = image::load_from_memory(raw).map_err(ArtworkError::Decode)?;
        let (width, height) = decoded.dimensions();

        let resized = match target_dimensions(self.resize_policy, width, height) {
            Some((target_width, target_height)) => {
                debug!(
                    width,
                    height,
                    target_width,
                    target_height,
                    policy = ?self.resize_policy,
                    "Resizing cover"
                );
                decoded.resize_exact(target_width, target_height, FilterType::CatmullRom)
            }
            None => decoded,
        };

        let flattened = flatten_for_jpeg(resized);

        let mut encoded = Vec::new();
        flattened
            .write_with_encoder(JpegEncoder::new_with_quality(
                &mut encoded,
                self.jpeg_quality,
            ))
            .map_err(ArtworkError::Encode)?;

        Ok(encoded)
    }
}

/// Normalize a cover with the default policy and quality.
pub fn normalize_cover(raw: &[u8]) -> Result<Vec<u8>> {
    CoverNormalizer::default().normalize(raw)
}

/// Output size for a cover, or `None` when it is left alone.
fn target_dimensions(policy: ResizePolicy, width: u32, height: u32) -> Option<(u32, u32)> {
    if width <= MAX_COVER_WIDTH {
        return None;
    }

    match policy {
        ResizePolicy::Stretch => Some((MAX_COVER_WIDTH, MAX_COVER_WIDTH)),
        ResizePolicy::FitWithin => {
            let scaled = (u64::from(height) * u64::from(MAX_COVER_WIDTH) + u64::from(width) / 2)
                / u64::from(width);
            Some((MAX_COVER_WIDTH, (scaled as u32).max(1)))
        }
    }
}

/// Reduce to a layout the JPEG encoder accepts. Alpha is discarded, never
/// composited.
fn flatten_for_jpeg(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => image,
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLuma8(image.to_luma8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}
