//! Configuration management for Immunize.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Immunize uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `IMMUNIZE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use immunize::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("immunize.toml")?;
//!
//! match &config.catalog.path {
//!     Some(path) => println!("Catalog: {}", path),
//!     None => println!("Catalog: built-in"),
//! }
//! println!("Upcoming window: {} days", config.schedule.upcoming_window_days);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`CatalogConfig`] - Catalog file and optional-dose policy
//! - [`ScheduleConfig`] - Horizon, windows and reminder lead time
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [catalog]
//! path = "${IMMUNIZE_CATALOG_DIR}/national-2025.json"
//! include_optional = true
//!
//! [schedule]
//! horizon_years = 18
//! upcoming_window_days = 60
//! notification_lead_days = 30
//! future_completion_tolerance_days = 7
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{ApplicationConfig, CatalogConfig, ImmunizeConfig, LoggingConfig, ScheduleConfig};
