//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use immunize::logging::init_logging;
//! use immunize::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a generated schedule
///
/// # Example
///
/// ```no_run
/// use immunize::log_schedule_generated;
/// use chrono::NaiveDate;
///
/// let birth_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// log_schedule_generated!(birth_date, 55);
/// ```
#[macro_export]
macro_rules! log_schedule_generated {
    ($birth_date:expr, $entries:expr) => {
        tracing::debug!(
            birth_date = %$birth_date,
            entries = $entries,
            "Schedule generated"
        );
    };
}

/// Log a completion that matched no schedule entry
///
/// # Example
///
/// ```no_run
/// use immunize::log_unmatched_completion;
/// use immunize::domain::{OccurrenceKey, VaccineId};
/// use chrono::NaiveDate;
///
/// let key = OccurrenceKey::new(VaccineId::new("hepb").unwrap(), 4);
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// log_unmatched_completion!(&key, date);
/// ```
#[macro_export]
macro_rules! log_unmatched_completion {
    ($occurrence:expr, $completed_date:expr) => {
        tracing::warn!(
            occurrence = %$occurrence,
            completed_date = %$completed_date,
            "Completion matches no schedule entry"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use immunize::log_error_with_context;
/// use immunize::domain::ImmunizeError;
///
/// let error = ImmunizeError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
