//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// WebP Exporter - export images as platform-organized WebP assets
#[derive(Parser, Debug)]
#[command(name = "webp-exporter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "webp-exporter.toml", env = "WEBPX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WEBPX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export source images as WebP files or a ZIP archive
    Export(commands::export::ExportArgs),

    /// Show, change or reset the persisted settings
    Settings(commands::settings::SettingsArgs),

    /// Edit the set of export scales
    Scales(commands::scales::ScalesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
