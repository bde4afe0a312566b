//! Scales command implementation
//!
//! Edits the persisted scale set the same way the scale editor in the plugin
//! UI does: values are unique, renames revert on collision, and scales the
//! active structure cannot produce are flagged.

use super::{load_or_report, open_session};
use crate::core::naming::scale_label;
use crate::core::scales::{parse_scale_input, ScaleField};
use clap::{Args, Subcommand};

/// Arguments for the scales command
#[derive(Args, Debug)]
pub struct ScalesArgs {
    #[command(subcommand)]
    pub action: ScalesAction,
}

#[derive(Subcommand, Debug)]
pub enum ScalesAction {
    /// List the scales with their platform labels
    List,

    /// Add the next free scale (largest + 1)
    Add,

    /// Remove a scale
    Remove {
        /// Scale to remove (e.g. 2, 1.5x, hdpi)
        scale: String,
    },

    /// Change one scale to another value
    Rename {
        /// Existing scale
        old: String,
        /// New value
        new: String,
    },
}

impl ScalesArgs {
    /// Execute the scales command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };
        let mut session = open_session(&config).await;
        let structure = session.settings().export_structure;

        let code = match &self.action {
            ScalesAction::List => 0,
            ScalesAction::Add => {
                let mut added = None;
                session
                    .update_settings(|s| added = Some(s.scales_mut().add()))
                    .await;
                if let Some(scale) = added {
                    println!("➕ Added {}", scale.label());
                }
                0
            }
            ScalesAction::Remove { scale } => {
                let scale = match parse_scale_input(scale) {
                    Ok(scale) => scale,
                    Err(e) => {
                        eprintln!("Invalid scale: {e}");
                        return Ok(2);
                    }
                };
                if !session.settings().scales().contains(scale) {
                    eprintln!("{} is not in the scale set", scale.label());
                    return Ok(1);
                }
                session
                    .update_settings(|s| {
                        s.scales_mut().remove(scale);
                    })
                    .await;
                println!("➖ Removed {}", scale.label());
                0
            }
            ScalesAction::Rename { old, new } => {
                let old = match parse_scale_input(old) {
                    Ok(scale) if session.settings().scales().contains(scale) => scale,
                    Ok(scale) => {
                        eprintln!("{} is not in the scale set", scale.label());
                        return Ok(1);
                    }
                    Err(e) => {
                        eprintln!("Invalid scale: {e}");
                        return Ok(2);
                    }
                };

                let mut field = ScaleField::new(old);
                field.set_draft(new.clone());
                let mut scales = session.settings().scales().clone();
                if field.submit(&mut scales) {
                    session
                        .update_settings(|s| s.selected_export_scales_v2 = scales)
                        .await;
                    println!("✏️  Renamed {} to {}", old.label(), field.value().label());
                    0
                } else {
                    eprintln!(
                        "Cannot rename {} to '{}': invalid or already present; kept {}",
                        old.label(),
                        new,
                        field.draft()
                    );
                    1
                }
            }
        };

        println!("Scales ({structure}):");
        for scale in session.settings().scales().iter() {
            let field = ScaleField::new(scale);
            match field.warning(structure) {
                Some(warning) => println!("  {}  ⚠️  {}", scale_label(structure, scale), warning),
                None => println!("  {}", scale_label(structure, scale)),
            }
        }

        Ok(code)
    }
}
