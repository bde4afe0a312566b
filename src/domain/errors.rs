//! Domain error types
//!
//! This module defines the error hierarchy for the exporter.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rendering a node at a scale failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Re-encoding a raster to WebP failed
    #[error("Compression error: {0}")]
    Compression(String),

    /// Archive assembly failed
    #[error("Archive error: {0}")]
    Archive(String),

    /// Settings store errors
    #[error("Settings store error: {0}")]
    Store(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Render-specific errors
///
/// Errors raised by the render collaborator for a single node/scale request.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The node could not be found or read
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// The node's source raster could not be decoded
    #[error("Failed to decode node {node}: {message}")]
    Decode { node: String, message: String },

    /// The scaled output would be empty or overflow
    #[error("Invalid output size for node {node} at {scale}x")]
    InvalidSize { node: String, scale: f64 },

    /// Encoding the rendered raster failed
    #[error("Failed to encode render of {node}: {message}")]
    Encode { node: String, message: String },
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<image::ImageError> for ExporterError {
    fn from(err: image::ImageError) -> Self {
        ExporterError::Compression(err.to_string())
    }
}

impl From<zip::result::ZipError> for ExporterError {
    fn from(err: zip::result::ZipError) -> Self {
        ExporterError::Archive(err.to_string())
    }
}
