//! Settings store implementations
//!
//! - [`file`] - JSON document on disk, one top-level key per stored value
//! - [`memory`] - process-local map for tests and embedding

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::adapters::traits::SettingsStore;
use crate::config::schema::ExporterConfig;
use std::sync::Arc;

/// Create the settings store described by the configuration
pub fn create_settings_store(config: &ExporterConfig) -> Arc<dyn SettingsStore> {
    tracing::debug!(path = %config.store.path, "Using JSON file settings store");
    Arc::new(JsonFileStore::new(&config.store.path))
}
