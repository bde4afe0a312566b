//! Lossy WebP compressor

use super::traits::Compressor;
use crate::domain::{ExporterError, Result};
use async_trait::async_trait;
use webp::{Encoder as WebpEncoder, WebPConfig};

/// Default libwebp effort (0 fastest, 6 smallest)
pub const DEFAULT_METHOD: i32 = 4;

/// Re-encodes rasters as lossy WebP
#[derive(Debug, Clone)]
pub struct WebpCompressor {
    method: i32,
}

impl WebpCompressor {
    pub fn new() -> Self {
        Self {
            method: DEFAULT_METHOD,
        }
    }

    /// Set the encoder effort, clamped to 0..=6
    pub fn with_method(mut self, method: i32) -> Self {
        self.method = method.clamp(0, 6);
        self
    }
}

impl Default for WebpCompressor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Compressor for WebpCompressor {
    async fn compress(&self, raw_image: &[u8], quality: f32) -> Result<Vec<u8>> {
        let raw = raw_image.to_vec();
        let method = self.method;
        tokio::task::spawn_blocking(move || encode_webp(&raw, quality, method))
            .await
            .map_err(|e| ExporterError::Compression(format!("Encoder task failed: {e}")))?
    }
}

/// Decode any supported raster and encode it as lossy WebP
///
/// `quality` is a 0.0–1.0 factor.
pub fn encode_webp(raw_image: &[u8], quality: f32, method: i32) -> Result<Vec<u8>> {
    let rgba = image::load_from_memory(raw_image)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let encoder = WebpEncoder::from_rgba(rgba.as_raw(), width, height);
    let mut config = WebPConfig::new()
        .map_err(|_| ExporterError::Compression("Failed to create WebPConfig".to_string()))?;
    config.method = method;
    config.quality = (quality.clamp(0.0, 1.0) * 100.0).round();

    let webp_data = encoder
        .encode_advanced(&config)
        .map_err(|e| ExporterError::Compression(format!("WebP encoding failed: {e:?}")))?;

    Ok(webp_data.to_vec())
}
