//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! working configuration that uses the built-in catalog.

use crate::core::schedule::ScheduleSettings;
use serde::{Deserialize, Serialize};

const MAX_HORIZON_YEARS: u32 = 120;
const MAX_WINDOW_DAYS: u32 = 3650;

/// Main Immunize configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmunizeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Schedule engine knobs
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ImmunizeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.catalog.validate()?;
        self.schedule.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Where vaccine definitions come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON or TOML catalog file; the built-in catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Schedule optional (non-mandatory) doses
    #[serde(default = "default_true")]
    pub include_optional: bool,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err("catalog.path must not be empty when set".to_string());
            }
            let lower = path.to_ascii_lowercase();
            if !(lower.ends_with(".json") || lower.ends_with(".toml")) {
                return Err(format!(
                    "catalog.path '{path}' must end in .json or .toml"
                ));
            }
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_optional: true,
        }
    }
}

/// Schedule engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Annual doses recur up to this age
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Days after today in which a pending dose counts as upcoming
    #[serde(default = "default_upcoming_window_days")]
    pub upcoming_window_days: u32,

    /// Reminder lead time before a due date
    #[serde(default = "default_notification_lead_days")]
    pub notification_lead_days: u32,

    /// Completion dates beyond today plus this many days are flagged
    #[serde(default = "default_future_completion_tolerance_days")]
    pub future_completion_tolerance_days: u32,
}

impl ScheduleConfig {
    fn validate(&self) -> Result<(), String> {
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return Err(format!(
                "schedule.horizon_years must be between 1 and {MAX_HORIZON_YEARS}"
            ));
        }

        for (name, value) in [
            ("upcoming_window_days", self.upcoming_window_days),
            ("notification_lead_days", self.notification_lead_days),
            (
                "future_completion_tolerance_days",
                self.future_completion_tolerance_days,
            ),
        ] {
            if value > MAX_WINDOW_DAYS {
                return Err(format!(
                    "schedule.{name} must be <= {MAX_WINDOW_DAYS} (got {value})"
                ));
            }
        }

        Ok(())
    }

    /// Engine settings for this configuration
    pub fn to_settings(&self) -> ScheduleSettings {
        ScheduleSettings {
            horizon_days: self.horizon_years * 365,
            upcoming_window_days: self.upcoming_window_days,
            notification_lead_days: self.notification_lead_days,
            future_completion_tolerance_days: self.future_completion_tolerance_days,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            horizon_years: default_horizon_years(),
            upcoming_window_days: default_upcoming_window_days(),
            notification_lead_days: default_notification_lead_days(),
            future_completion_tolerance_days: default_future_completion_tolerance_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a local rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_horizon_years() -> u32 {
    18
}

fn default_upcoming_window_days() -> u32 {
    crate::core::schedule::settings::DEFAULT_UPCOMING_WINDOW_DAYS
}

fn default_notification_lead_days() -> u32 {
    crate::core::schedule::settings::DEFAULT_NOTIFICATION_LEAD_DAYS
}

fn default_future_completion_tolerance_days() -> u32 {
    crate::core::schedule::settings::DEFAULT_FUTURE_COMPLETION_TOLERANCE_DAYS
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ImmunizeConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.catalog.include_optional);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ImmunizeConfig = toml::from_str("").unwrap();
        assert_eq!(config, ImmunizeConfig::default());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_catalog_config_validation() {
        let mut config = CatalogConfig::default();
        assert!(config.validate().is_ok());

        config.path = Some("catalog.json".to_string());
        assert!(config.validate().is_ok());

        config.path = Some("catalog.yaml".to_string());
        assert!(config.validate().is_err());

        config.path = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_schedule_config_validation() {
        let mut config = ScheduleConfig::default();
        assert!(config.validate().is_ok());

        config.horizon_years = 0;
        assert!(config.validate().is_err());

        config.horizon_years = 121;
        assert!(config.validate().is_err());

        config.horizon_years = 18;
        config.upcoming_window_days = 4000;
        let err = config.validate().unwrap_err();
        assert!(err.contains("upcoming_window_days"));
    }

    #[test]
    fn test_schedule_config_to_settings() {
        let config = ScheduleConfig {
            horizon_years: 2,
            upcoming_window_days: 14,
            notification_lead_days: 7,
            future_completion_tolerance_days: 1,
        };
        let settings = config.to_settings();
        assert_eq!(settings.horizon_days, 730);
        assert_eq!(settings.upcoming_window_days, 14);
        assert_eq!(settings.notification_lead_days, 7);
        assert_eq!(settings.future_completion_tolerance_days, 1);

        assert_eq!(ScheduleConfig::default().to_settings(), ScheduleSettings::default());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }
}
