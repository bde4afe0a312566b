//! Settings command implementation
//!
//! Shows, edits or resets the persisted settings. Edits go through the same
//! `SAVE_SETTINGS` path the plugin UI uses, so they are migrated before they
//! are stored.

use super::{load_or_report, open_session};
use crate::core::session::PluginEvent;
use crate::core::settings::{ExportQuality, PartialSettings, SchemaVersion};
use crate::domain::{ExportStructure, NamingTransform};
use clap::{Args, Subcommand};

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the migrated settings as JSON
    Show,

    /// Change individual settings
    Set(SetArgs),

    /// Replace the settings with defaults
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Export structure (android, ios, web, flat)
    #[arg(long)]
    pub structure: Option<ExportStructure>,

    /// Quality percentage (10-100)
    #[arg(long)]
    pub quality: Option<i64>,

    /// Name transform (no-transform, lowercase, case-sensitive)
    #[arg(long)]
    pub transform: Option<NamingTransform>,

    /// Separator replacing non-alphanumeric runs in names
    #[arg(long)]
    pub separator: Option<String>,
}

impl SetArgs {
    fn is_empty(&self) -> bool {
        self.structure.is_none()
            && self.quality.is_none()
            && self.transform.is_none()
            && self.separator.is_none()
    }

    /// Apply the changes to a settings record
    fn apply(&self, record: &mut PartialSettings) -> Result<(), String> {
        if let Some(quality) = self.quality {
            ExportQuality::new(quality)?;
            record.export_quality = Some(quality);
        }
        if let Some(structure) = self.structure {
            record.export_structure = Some(structure);
        }
        let naming = record.naming_convention.get_or_insert_with(Default::default);
        if let Some(transform) = self.transform {
            naming.transform = transform;
        }
        if let Some(separator) = &self.separator {
            naming.replacement = separator.clone();
        }
        Ok(())
    }
}

impl SettingsArgs {
    /// Execute the settings command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };
        let mut session = open_session(&config).await;

        match &self.action {
            SettingsAction::Show => {
                let record = PartialSettings::from(session.settings().clone());
                tracing::debug!(version = %SchemaVersion::detect(&record), "Showing settings");
                println!("{}", serde_json::to_string_pretty(session.settings())?);
                Ok(0)
            }
            SettingsAction::Set(args) => {
                if args.is_empty() {
                    eprintln!("Nothing to change; pass at least one option");
                    return Ok(2);
                }

                let mut record = PartialSettings::from(session.settings().clone());
                if let Err(e) = args.apply(&mut record) {
                    eprintln!("Invalid setting: {e}");
                    return Ok(2);
                }

                session
                    .handle(PluginEvent::SaveSettings {
                        settings: serde_json::to_value(record)?,
                    })
                    .await?;
                println!("✅ Settings saved to {}", config.store.path);
                println!("{}", serde_json::to_string_pretty(session.settings())?);
                Ok(0)
            }
            SettingsAction::Reset => {
                let defaults = crate::core::settings::migrate(None);
                session
                    .handle(PluginEvent::SaveSettings {
                        settings: serde_json::to_value(PartialSettings::from(defaults))?,
                    })
                    .await?;
                println!("✅ Settings reset to defaults");
                Ok(0)
            }
        }
    }
}
