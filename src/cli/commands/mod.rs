//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod scales;
pub mod settings;
pub mod validate;

use crate::adapters::{create_settings_store, RasterFileRenderer, WebpCompressor, ZipArchiveFactory};
use crate::config::{load_config_or_default, ExporterConfig};
use crate::core::export::ExportCoordinator;
use crate::core::session::PluginSession;
use crate::core::settings::SettingsManager;
use std::sync::Arc;

/// Load the configuration, printing the failure for the user
///
/// Returns `None` when the configuration is unusable; callers exit with 2.
fn load_or_report(config_path: &str) -> Option<ExporterConfig> {
    match load_config_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            crate::log_error_with_context!(&e, "Failed to load configuration");
            eprintln!("Configuration error: {e}");
            None
        }
    }
}

/// Wire the file-backed adapters into a session
async fn open_session(config: &ExporterConfig) -> PluginSession {
    let compressor = WebpCompressor::new().with_method(config.export.encoder_method);
    let coordinator = ExportCoordinator::new(
        Arc::new(RasterFileRenderer::new()),
        Arc::new(compressor),
        Arc::new(ZipArchiveFactory::new()),
    )
    .with_archive_prefix(config.export.archive_prefix.clone());

    let manager = SettingsManager::new(create_settings_store(config));
    PluginSession::start(manager, Arc::new(coordinator)).await
}
