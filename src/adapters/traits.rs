//! Collaborator traits
//!
//! This module defines the seams between the export logic and the systems it
//! drives: rendering nodes, re-encoding rasters, assembling archives and
//! persisting settings.

use crate::domain::{Result, Scale, SelectedNode};
use async_trait::async_trait;

/// Renders a node to raw raster bytes
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Render `node` at `scale`
    ///
    /// # Returns
    ///
    /// PNG-encoded raster bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot be found or rendered.
    async fn render(&self, node: &SelectedNode, scale: Scale) -> Result<Vec<u8>>;
}

/// Re-encodes raster bytes into a compressed image
#[async_trait]
pub trait Compressor: Send + Sync {
    /// Compress `raw_image` with `quality` in 0.0..=1.0
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a decodable image.
    async fn compress(&self, raw_image: &[u8], quality: f32) -> Result<Vec<u8>>;

    /// File extension of the compressed output, without the dot
    fn extension(&self) -> &'static str {
        "webp"
    }
}

/// An archive under construction
#[async_trait]
pub trait ArchiveBuilder: Send {
    /// Add a named entry
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn add_entry(&mut self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Number of entries added so far
    fn entry_count(&self) -> usize;

    /// Finish the archive and return its bytes
    async fn finalize(self: Box<Self>) -> Result<Vec<u8>>;
}

/// Creates empty archives
pub trait ArchiveFactory: Send + Sync {
    fn new_archive(&self) -> Box<dyn ArchiveBuilder>;

    /// File extension of finished archives, without the dot
    fn extension(&self) -> &'static str {
        "zip"
    }
}

/// Key-value storage for persisted settings
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    ///
    /// Returns `Ok(None)` if nothing is stored under the key.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}
