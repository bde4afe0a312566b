// WebP Exporter - platform-organized WebP asset export
// Copyright (c) 2025 WebP Exporter Contributors
// Licensed under the MIT License

//! # WebP Exporter
//!
//! Exports selected design nodes as WebP images at several scale factors,
//! named and grouped for Android, iOS, web or flat output.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Naming** every exported file per platform convention (`drawable-xhdpi/`, `@2x`, `_2x`)
//! - **Migrating** persisted settings from every historical schema to the current one
//! - **Managing** the scale set edited by the user
//! - **Exporting** nodes through render, compress and package stages
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (naming, scales, settings, export, session)
//! - [`adapters`] - Rendering, WebP encoding, ZIP packaging, settings stores
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use webp_exporter::adapters::{
//!     node_from_path, MemoryStore, RasterFileRenderer, WebpCompressor, ZipArchiveFactory,
//! };
//! use webp_exporter::core::export::{ExportCoordinator, ExportOptions};
//! use webp_exporter::core::settings::SettingsManager;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = SettingsManager::new(Arc::new(MemoryStore::new())).load().await;
//!
//!     let coordinator = ExportCoordinator::new(
//!         Arc::new(RasterFileRenderer::new()),
//!         Arc::new(WebpCompressor::new()),
//!         Arc::new(ZipArchiveFactory::new()),
//!     );
//!
//!     let nodes = vec![node_from_path("icon.png".as_ref())];
//!     let outcome = coordinator
//!         .export(&nodes, &ExportOptions::from_settings(&settings))
//!         .await?;
//!
//!     if let Some(artifact) = outcome.artifact {
//!         artifact.write_to("export".as_ref()).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::ExporterError`]; the CLI maps failures
//! to exit codes (0 success, 1 nothing exported, 2 invalid input, 5 fatal).

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
