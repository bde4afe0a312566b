//! Raster file renderer
//!
//! Treats each source PNG (or JPEG) file as one design node. Rendering a node
//! at a scale decodes the source, resamples it and re-encodes it as PNG, the
//! same shape of output a design tool's raster export produces.

use super::traits::Renderer;
use crate::domain::{ExporterError, RenderError, Result, Scale, SelectedNode};
use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Largest edge a rendered image may have
///
/// WebP cannot encode anything larger than 16383 pixels per side.
pub const MAX_DIMENSION: u32 = 16_383;

/// Build a [`SelectedNode`] for a source file, named after its file stem
pub fn node_from_path(path: &Path) -> SelectedNode {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    SelectedNode::new(path.display().to_string(), name)
}

/// Renders nodes backed by raster files on disk
#[derive(Debug, Clone)]
pub struct RasterFileRenderer {
    filter: FilterType,
}

impl RasterFileRenderer {
    /// Create a renderer using Lanczos3 resampling
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    /// Use a different resampling filter
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for RasterFileRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for RasterFileRenderer {
    async fn render(&self, node: &SelectedNode, scale: Scale) -> Result<Vec<u8>> {
        let source = tokio::fs::read(&node.id).await.map_err(|e| {
            tracing::debug!(node = %node.id, error = %e, "Failed to read node source");
            RenderError::NodeNotFound(node.id.clone())
        })?;

        let node_id = node.id.clone();
        let filter = self.filter;
        let rendered =
            tokio::task::spawn_blocking(move || render_scaled(&source, &node_id, scale, filter))
                .await
                .map_err(|e| ExporterError::Export(format!("Render task failed: {e}")))??;

        tracing::debug!(
            node = %node.name,
            scale = %scale,
            bytes = rendered.len(),
            "Rendered node"
        );
        Ok(rendered)
    }
}

/// Decode, resample and PNG-encode one node at one scale
pub fn render_scaled(
    source: &[u8],
    node_id: &str,
    scale: Scale,
    filter: FilterType,
) -> std::result::Result<Vec<u8>, RenderError> {
    let image = image::load_from_memory(source).map_err(|e| RenderError::Decode {
        node: node_id.to_string(),
        message: e.to_string(),
    })?;

    let width = (f64::from(image.width()) * scale.value()).round();
    let height = (f64::from(image.height()) * scale.value()).round();
    let max = f64::from(MAX_DIMENSION);
    if width < 1.0 || height < 1.0 || width > max || height > max {
        return Err(RenderError::InvalidSize {
            node: node_id.to_string(),
            scale: scale.value(),
        });
    }

    let (width, height) = (width as u32, height as u32);
    let scaled: DynamicImage = if width == image.width() && height == image.height() {
        image
    } else {
        image.resize_exact(width, height, filter)
    };

    let mut out = Vec::new();
    scaled
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| RenderError::Encode {
            node: node_id.to_string(),
            message: e.to_string(),
        })?;
    Ok(out)
}
