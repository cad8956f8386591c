//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "immunize.toml")]
    pub output: String,

    /// Include comments and a sample catalog entry
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

        println!("📝 Initializing Immunize configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match tokio::fs::write(&self.output, config_content).await {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Optionally point [catalog].path at a JSON or TOML catalog");
                println!("  3. Validate configuration: immunize validate-config");
                println!("  4. Print a schedule: immunize schedule --birth-date 2024-01-15");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Immunize Configuration File

[application]
log_level = "info"

[catalog]
# path = "catalog.json"
include_optional = true

[schedule]
horizon_years = 18
upcoming_window_days = 60
notification_lead_days = 30
future_completion_tolerance_days = 7

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with comments
    fn generate_config_with_examples() -> String {
        r#"# Immunize Configuration File
# Childhood vaccination schedule calculator
#
# Any value may reference environment variables with ${VAR_NAME}, and any key
# may be overridden with IMMUNIZE_<SECTION>_<KEY>, e.g.
# IMMUNIZE_SCHEDULE_UPCOMING_WINDOW_DAYS=30

# ============================================================================
# Application Configuration
# ============================================================================
[application]
# Log level: trace, debug, info, warn, error
log_level = "info"

# ============================================================================
# Catalog Configuration
# ============================================================================
[catalog]
# JSON or TOML catalog file. When unset, the built-in national schedule is used.
# path = "${IMMUNIZE_CATALOG_DIR}/catalog.toml"
#
# A TOML catalog looks like:
#
#   version = "2025.1"
#
#   [[vaccines]]
#   id = "hepb"
#   name = "Hepatitis B"
#   disease = "Hepatitis B"
#   mandatory = true
#
#   [[vaccines.doses]]
#   dose_number = 1
#   age = "at birth"
#
#   [[vaccines.doses]]
#   dose_number = 2
#   age = "1 month"

# Schedule optional (non-mandatory) vaccines such as rotavirus
include_optional = true

# ============================================================================
# Schedule Configuration
# ============================================================================
[schedule]
# Annual vaccines recur every year up to this age
horizon_years = 18

# Pending doses due within this many days are "upcoming"
upcoming_window_days = 60

# Reminders start this many days before a due date
notification_lead_days = 30

# Completion dates more than this many days in the future are reported
future_completion_tolerance_days = 7

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON logs to a rolling file
local_enabled = false

# Log directory
local_path = "./logs"

# Log rotation: daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
