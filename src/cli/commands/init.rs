//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "webp-exporter.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: webp-exporter validate-config");
                println!("  3. Run export: webp-exporter export icon.png");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# WebP Exporter Configuration File

[application]
log_level = "info"

[store]
path = ".webp-exporter/settings.json"

[export]
output_dir = "export"
archive_prefix = "webp-export"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# WebP Exporter Configuration File
#
# Values can reference environment variables with ${VAR_NAME}.
# Every key can also be overridden with WEBPX_<SECTION>_<KEY>,
# for example WEBPX_EXPORT_OUTPUT_DIR=out.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

[store]
# JSON file holding the persisted plugin settings
# (structure, quality, scales, naming convention, window size)
path = ".webp-exporter/settings.json"

[export]
# Directory exported files and archives are written to
output_dir = "export"

# Archives with more than one node are named <prefix>-YYYYMMDD-HHMMSS.zip
archive_prefix = "webp-export"

# libwebp effort: 0 (fastest) to 6 (smallest files)
encoder_method = 4

[logging]
# Write JSON logs to files in addition to the console
local_enabled = false
local_path = "logs"

# Rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
