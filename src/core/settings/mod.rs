//! Persisted plugin settings
//!
//! - [`schema`] - the current settings shape and its partial, on-disk form
//! - [`migrate`] - ordered upgrade steps from any older shape
//! - [`manager`] - loading and saving through a [`SettingsStore`](crate::adapters::SettingsStore)

pub mod manager;
pub mod migrate;
pub mod schema;

pub use manager::{SettingsManager, SETTINGS_KEY};
pub use migrate::{migrate, migrate_value, MigrationStep, SchemaVersion, STEPS};
pub use schema::{
    ExportQuality, PartialSettings, Settings, WindowSize, MAX_EXPORT_QUALITY, MIN_EXPORT_QUALITY,
    MIN_WINDOW_HEIGHT, WINDOW_WIDTH,
};
