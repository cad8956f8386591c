//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ImmunizeConfig;
use crate::domain::{ImmunizeError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ImmunizeConfig
/// 4. Applies environment variable overrides (IMMUNIZE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use immunize::config::load_config;
///
/// let config = load_config("immunize.toml").expect("Failed to load config");
/// println!("upcoming window: {} days", config.schedule.upcoming_window_days);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ImmunizeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ImmunizeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ImmunizeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = parse_config(&contents)?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Loads the file if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<ImmunizeConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    let mut config = ImmunizeConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Parses configuration text: substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<ImmunizeConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ImmunizeConfig = toml::from_str(&contents)
        .map_err(|e| ImmunizeError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &ImmunizeConfig) -> Result<()> {
    config.validate().map_err(|e| {
        ImmunizeError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(ImmunizeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            ImmunizeError::Configuration(format!("Invalid value for {name}: '{val}'"))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using IMMUNIZE_* prefix
///
/// Environment variables follow the pattern: IMMUNIZE_<SECTION>_<KEY>
/// For example: IMMUNIZE_CATALOG_PATH, IMMUNIZE_SCHEDULE_UPCOMING_WINDOW_DAYS
fn apply_env_overrides(config: &mut ImmunizeConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("IMMUNIZE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Catalog overrides
    if let Ok(val) = std::env::var("IMMUNIZE_CATALOG_PATH") {
        config.catalog.path = Some(val);
    }
    if let Some(val) = env_parse("IMMUNIZE_CATALOG_INCLUDE_OPTIONAL")? {
        config.catalog.include_optional = val;
    }

    // Schedule overrides
    if let Some(val) = env_parse("IMMUNIZE_SCHEDULE_HORIZON_YEARS")? {
        config.schedule.horizon_years = val;
    }
    if let Some(val) = env_parse("IMMUNIZE_SCHEDULE_UPCOMING_WINDOW_DAYS")? {
        config.schedule.upcoming_window_days = val;
    }
    if let Some(val) = env_parse("IMMUNIZE_SCHEDULE_NOTIFICATION_LEAD_DAYS")? {
        config.schedule.notification_lead_days = val;
    }
    if let Some(val) = env_parse("IMMUNIZE_SCHEDULE_FUTURE_COMPLETION_TOLERANCE_DAYS")? {
        config.schedule.future_completion_tolerance_days = val;
    }

    // Logging overrides
    if let Some(val) = env_parse("IMMUNIZE_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Ok(val) = std::env::var("IMMUNIZE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("IMMUNIZE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
