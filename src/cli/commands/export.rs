//! Export command implementation
//!
//! This module implements the `export` command: every input file is one
//! selected node, exported at the scales from the persisted settings unless
//! overridden on the command line.

use super::{load_or_report, open_session};
use crate::adapters::node_from_path;
use crate::core::export::Artifact;
use crate::core::scales::{parse_scale_input, ScaleSet};
use crate::core::session::PluginEvent;
use crate::core::settings::ExportQuality;
use crate::domain::{ExportStructure, Scale, SelectedNode};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Source images, one node per file
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Override export structure (android, ios, web, flat)
    #[arg(short, long)]
    pub structure: Option<ExportStructure>,

    /// Override scales (comma-separated, e.g. 1,1.5x,xhdpi,@3x)
    #[arg(long, value_delimiter = ',')]
    pub scales: Option<Vec<String>>,

    /// Override quality percentage (10-100)
    #[arg(short, long)]
    pub quality: Option<i64>,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// File name used instead of the node name (single input only)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Persist the overrides as the new settings
    #[arg(long)]
    pub save: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(inputs = self.inputs.len(), "Starting export command");

        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };

        let missing: Vec<&Path> = self
            .inputs
            .iter()
            .map(PathBuf::as_path)
            .filter(|p| !p.is_file())
            .collect();
        if !missing.is_empty() {
            for path in &missing {
                eprintln!("Input not found: {}", path.display());
            }
            return Ok(2);
        }

        let quality = match self.quality.map(ExportQuality::new).transpose() {
            Ok(quality) => quality,
            Err(e) => {
                eprintln!("Invalid quality: {e}");
                return Ok(2);
            }
        };

        let scales = match self.scales.as_deref().map(parse_scales).transpose() {
            Ok(scales) => scales,
            Err(e) => {
                eprintln!("Invalid scale: {e}");
                return Ok(2);
            }
        };

        let mut session = open_session(&config).await;

        let apply = |settings: &mut crate::core::settings::Settings| {
            if let Some(structure) = self.structure {
                settings.export_structure = structure;
            }
            if let Some(quality) = quality {
                settings.export_quality = quality;
            }
            if let Some(scales) = &scales {
                settings.selected_export_scales_v2 = scales.clone();
            }
        };
        if self.save {
            session.update_settings(apply).await;
        } else {
            apply(session.settings_mut());
        }

        let structure = session.settings().export_structure;
        for scale in session.settings().scales().unsupported(structure) {
            println!(
                "⚠️  {}x: Scale not supported on {}; will be ignored",
                scale,
                structure.platform_name()
            );
        }

        let nodes: Vec<SelectedNode> = self.inputs.iter().map(|p| node_from_path(p)).collect();
        session
            .handle(PluginEvent::SelectionChanged {
                total_pixel_size: total_pixel_size(&self.inputs),
                nodes,
                preview_images: Vec::new(),
            })
            .await?;

        println!("🚀 Exporting {} image(s)...", self.inputs.len());

        let outcome = match session
            .handle(PluginEvent::RenderRequest {
                scales: Vec::new(),
                file_name: self.name.clone(),
            })
            .await
        {
            Ok(Some(outcome)) => outcome,
            Ok(None) => return Ok(1),
            Err(e) => {
                eprintln!("Export failed: {e}");
                return Ok(5);
            }
        };

        let Some(artifact) = &outcome.artifact else {
            println!("Nothing to export: no selected scale is supported on {structure}");
            return Ok(1);
        };

        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.export.output_dir));
        let written = match artifact.write_to(&output_dir).await {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Failed to write {}: {e}", artifact.name());
                return Ok(5);
            }
        };

        let summary = &outcome.summary;
        println!();
        println!("📊 Export Summary:");
        println!("  Nodes: {}", summary.total_nodes);
        println!("  Files: {}", summary.files_written);
        println!("  Skipped: {}", summary.skipped.len());
        println!("  Size Reduction: {:.2}%", summary.size_reduction());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        if let Artifact::Archive { entries, .. } = artifact {
            println!("  Archive Entries: {}", entries.len());
        }
        println!();
        println!("✅ Wrote {}", written.display());

        Ok(0)
    }
}

/// Parse scale overrides into a set, dropping duplicates
fn parse_scales(raw: &[String]) -> Result<ScaleSet, String> {
    raw.iter()
        .map(|text| parse_scale_input(text))
        .collect::<Result<Vec<Scale>, String>>()
        .map(ScaleSet::from)
}

/// Sum of width × height over the inputs; unreadable headers count as zero
fn total_pixel_size(inputs: &[PathBuf]) -> u64 {
    inputs
        .iter()
        .filter_map(|path| image::image_dimensions(path).ok())
        .map(|(w, h)| u64::from(w) * u64::from(h))
        .sum()
}
