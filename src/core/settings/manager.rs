//! Settings manager for persistence
//!
//! Loads settings from a [`SettingsStore`], upgrades them to the current
//! shape and writes them back.

use super::migrate::migrate_value;
use super::schema::{PartialSettings, Settings};
use crate::adapters::traits::SettingsStore;
use crate::domain::Result;
use std::sync::Arc;

/// Store key the settings document lives under
pub const SETTINGS_KEY: &str = "settings";

/// Settings manager
///
/// Reading never fails: a store error or an unreadable document yields the
/// defaults the migrator produces from an empty record.
#[derive(Clone)]
pub struct SettingsManager {
    store: Arc<dyn SettingsStore>,
}

impl SettingsManager {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Load and migrate the stored settings
    pub async fn load(&self) -> Settings {
        let stored = match self.store.get(SETTINGS_KEY).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load settings, using defaults");
                None
            }
        };
        migrate_value(stored)
    }

    /// Load, migrate and persist the upgraded settings
    ///
    /// A failed write-back is logged and otherwise ignored.
    pub async fn load_and_upgrade(&self) -> Settings {
        let settings = self.load().await;
        if let Err(e) = self.save(&settings).await {
            tracing::warn!(error = %e, "Failed to persist migrated settings");
        }
        settings
    }

    /// Persist settings
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or the store
    /// rejects the write.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        let value = serde_json::to_value(PartialSettings::from(settings.clone()))?;
        self.store.set(SETTINGS_KEY, value).await?;
        tracing::debug!(
            structure = %settings.export_structure,
            quality = %settings.export_quality,
            scales = settings.scales().len(),
            "Saved settings"
        );
        Ok(())
    }

    /// Migrate an arbitrary settings document and persist the result
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write; the migrated settings
    /// are not returned in that case.
    pub async fn save_value(&self, value: serde_json::Value) -> Result<Settings> {
        let settings = migrate_value(Some(value));
        self.save(&settings).await?;
        Ok(settings)
    }

    /// Replace the stored settings with defaults
    pub async fn reset(&self) -> Result<Settings> {
        let settings = migrate_value(None);
        self.save(&settings).await?;
        tracing::info!("Settings reset to defaults");
        Ok(settings)
    }
}
