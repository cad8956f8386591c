//! Validate config command implementation
//!
//! Loads the configuration and the catalog it points at, and prints a
//! summary including the catalog fingerprint.

use super::{build_engine, report_error, EXIT_OK};
use crate::config::load_config_or_default;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        if !Path::new(config_path).exists() {
            println!("   (file not found, using defaults)");
        }
        println!();

        let config = match load_config_or_default(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => return Ok(report_error(&e, "Configuration validation failed")),
        };

        let engine = match build_engine(&config) {
            Ok(engine) => {
                println!("✅ Catalog is valid");
                engine
            }
            Err(e) => return Ok(report_error(&e, "Catalog validation failed")),
        };

        let catalog = engine.catalog();
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Catalog: {}",
            config.catalog.path.as_deref().unwrap_or("built-in")
        );
        println!("  Catalog Version: {}", catalog.version().unwrap_or("-"));
        println!(
            "  Vaccines: {} ({} dose definitions)",
            catalog.vaccine_ids().len(),
            catalog.len()
        );
        println!("  Fingerprint: {}", engine.fingerprint());
        println!("  Include Optional: {}", config.catalog.include_optional);
        println!("  Horizon: {} years", config.schedule.horizon_years);
        println!(
            "  Upcoming Window: {} days",
            config.schedule.upcoming_window_days
        );
        println!(
            "  Notification Lead: {} days",
            config.schedule.notification_lead_days
        );
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();

        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::EXIT_CONFIG;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_defaults() {
        let code = ValidateArgs {}.execute("no-such-config.toml").await.unwrap();
        assert_eq!(code, EXIT_OK);
    }

    #[tokio::test]
    async fn test_validate_bad_catalog() {
        let mut catalog = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        catalog
            .write_all(
                br#"{"vaccines": [{"id": "x", "name": "X", "doses": [
                    {"dose_number": 1, "age_days": 120},
                    {"dose_number": 2, "age_days": 60}
                ]}]}"#,
            )
            .unwrap();
        catalog.flush().unwrap();

        let mut config = NamedTempFile::new().unwrap();
        writeln!(
            config,
            "[catalog]\npath = {:?}",
            catalog.path().to_string_lossy()
        )
        .unwrap();
        config.flush().unwrap();

        let code = ValidateArgs {}
            .execute(&config.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
