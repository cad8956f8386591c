//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables take ENV_MUTEX so they do not
//! interfere with each other.

use immunize::config::{load_config, load_config_or_default, ImmunizeConfig};
use immunize::domain::ImmunizeError;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("IMMUNIZE_APPLICATION_LOG_LEVEL");
    std::env::remove_var("IMMUNIZE_CATALOG_PATH");
    std::env::remove_var("IMMUNIZE_CATALOG_INCLUDE_OPTIONAL");
    std::env::remove_var("IMMUNIZE_SCHEDULE_UPCOMING_WINDOW_DAYS");
    std::env::remove_var("IMMUNIZE_SCHEDULE_HORIZON_YEARS");
    std::env::remove_var("TEST_CATALOG_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[catalog]
path = "catalogs/national.toml"
include_optional = false

[schedule]
horizon_years = 12
upcoming_window_days = 45
notification_lead_days = 14
future_completion_tolerance_days = 3

[logging]
local_enabled = true
local_path = "/tmp/immunize"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.catalog.path.as_deref(), Some("catalogs/national.toml"));
    assert!(!config.catalog.include_optional);
    assert_eq!(config.schedule.horizon_years, 12);
    assert_eq!(config.schedule.upcoming_window_days, 45);
    assert_eq!(config.schedule.notification_lead_days, 14);
    assert_eq!(config.schedule.future_completion_tolerance_days, 3);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let settings = config.schedule.to_settings();
    assert_eq!(settings.horizon_days, 12 * 365);
}

#[test]
fn test_partial_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[schedule]\nupcoming_window_days = 30\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.schedule.upcoming_window_days, 30);
    assert_eq!(config.schedule.horizon_years, 18);
    assert_eq!(config.application, ImmunizeConfig::default().application);
    assert!(config.catalog.path.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CATALOG_DIR", "/srv/catalogs");

    let file = write_config("[catalog]\npath = \"${TEST_CATALOG_DIR}/2025.json\"\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.catalog.path.as_deref(), Some("/srv/catalogs/2025.json"));

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[catalog]\npath = \"${TEST_CATALOG_DIR}/2025.json\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ImmunizeError::Configuration(_)));
    assert!(err.to_string().contains("TEST_CATALOG_DIR"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("IMMUNIZE_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("IMMUNIZE_CATALOG_INCLUDE_OPTIONAL", "false");
    std::env::set_var("IMMUNIZE_SCHEDULE_UPCOMING_WINDOW_DAYS", "21");

    let file = write_config("[schedule]\nupcoming_window_days = 30\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert!(!config.catalog.include_optional);
    assert_eq!(config.schedule.upcoming_window_days, 21);

    cleanup_env_vars();
}

#[test]
fn test_unparseable_override_is_error() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("IMMUNIZE_SCHEDULE_HORIZON_YEARS", "eighteen");

    let file = write_config("");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("IMMUNIZE_SCHEDULE_HORIZON_YEARS"));

    cleanup_env_vars();
}

#[test]
fn test_override_is_validated() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("IMMUNIZE_APPLICATION_LOG_LEVEL", "loud");

    let result = load_config_or_default("definitely-missing.toml");
    assert!(matches!(result, Err(ImmunizeError::Configuration(_))));

    cleanup_env_vars();
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    assert!(load_config("definitely-missing.toml").is_err());
    let config = load_config_or_default("definitely-missing.toml").unwrap();
    assert_eq!(config, ImmunizeConfig::default());
}

#[test]
fn test_invalid_rotation_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config("[logging]\nlocal_rotation = \"weekly\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("local_rotation"));
}
