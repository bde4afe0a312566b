//! Core logic of the exporter.
//!
//! # Modules
//!
//! - [`naming`] - per-structure file naming rules and name sanitization
//! - [`scales`] - the scale set and user-entered scale parsing
//! - [`settings`] - persisted settings, their migration and persistence
//! - [`export`] - export orchestration, packaging and summaries
//! - [`session`] - the event-driven controller tying it all together
//!
//! # Export Workflow
//!
//! 1. **Load Settings**: read the stored record and migrate it
//! 2. **Select**: receive the nodes to export
//! 3. **Plan**: derive a file path for every supported (node, scale) pair
//! 4. **Render**: render every pair concurrently
//! 5. **Compress**: re-encode every render as WebP concurrently
//! 6. **Deliver**: a bare file for one node at one scale, an archive otherwise
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use webp_exporter::adapters::{MemoryStore, RasterFileRenderer, WebpCompressor, ZipArchiveFactory};
//! use webp_exporter::core::export::ExportCoordinator;
//! use webp_exporter::core::session::{PluginEvent, PluginSession};
//! use webp_exporter::core::settings::SettingsManager;
//! use webp_exporter::domain::SelectedNode;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = ExportCoordinator::new(
//!     Arc::new(RasterFileRenderer::new()),
//!     Arc::new(WebpCompressor::new()),
//!     Arc::new(ZipArchiveFactory::new()),
//! );
//! let manager = SettingsManager::new(Arc::new(MemoryStore::new()));
//! let mut session = PluginSession::start(manager, Arc::new(coordinator)).await;
//!
//! session
//!     .handle(PluginEvent::SelectionChanged {
//!         total_pixel_size: 0,
//!         nodes: vec![SelectedNode::new("icon.png", "icon")],
//!         preview_images: Vec::new(),
//!     })
//!     .await?;
//!
//! if let Some(outcome) = session
//!     .handle(PluginEvent::RenderRequest { scales: Vec::new(), file_name: None })
//!     .await?
//! {
//!     println!("Files: {}", outcome.summary.files_written);
//! }
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod naming;
pub mod scales;
pub mod session;
pub mod settings;
