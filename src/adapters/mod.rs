//! Integrations with the systems an export drives.
//!
//! - [`traits`] - collaborator seams used by the core
//! - [`render`] - raster file renderer (one source file per node)
//! - [`codec`] - lossy WebP compressor
//! - [`archive`] - in-memory ZIP archives
//! - [`store`] - settings persistence (JSON file, in-memory)
//!
//! # Design Pattern
//!
//! The core only sees the traits in [`traits`], so every collaborator can be
//! swapped for a mock in tests:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use webp_exporter::adapters::{RasterFileRenderer, WebpCompressor, ZipArchiveFactory};
//! use webp_exporter::core::export::ExportCoordinator;
//!
//! let coordinator = ExportCoordinator::new(
//!     Arc::new(RasterFileRenderer::new()),
//!     Arc::new(WebpCompressor::new()),
//!     Arc::new(ZipArchiveFactory::new()),
//! );
//! ```

pub mod archive;
pub mod codec;
pub mod render;
pub mod store;
pub mod traits;

pub use archive::{ZipArchive, ZipArchiveFactory};
pub use codec::WebpCompressor;
pub use render::{node_from_path, RasterFileRenderer};
pub use store::{create_settings_store, JsonFileStore, MemoryStore};
pub use traits::{ArchiveBuilder, ArchiveFactory, Compressor, Renderer, SettingsStore};
