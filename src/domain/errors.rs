//! Domain error types
//!
//! This module defines the error hierarchy for Immunize.
//! All errors are domain-specific and don't expose third-party types.

use super::ids::VaccineId;
use thiserror::Error;

/// Main Immunize error type
///
/// This is the primary error type used throughout the crate. Engine operations
/// only ever return [`ImmunizeError::InvalidCatalog`] or
/// [`ImmunizeError::InvalidChild`]; the remaining variants belong to the
/// configuration, catalog loading and CLI layers.
#[derive(Debug, Error)]
pub enum ImmunizeError {
    /// The vaccine catalog violates one of its invariants
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(#[from] CatalogError),

    /// The child record cannot be scheduled (e.g. born after "now")
    #[error("Invalid child: {0}")]
    InvalidChild(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Catalog validation errors
///
/// Every variant names the offending vaccine so the catalog author can fix the
/// source document. None of these are auto-corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A dose is recommended before birth
    #[error("{vaccine_id} dose {dose_number}: recommended age {days} days is negative")]
    NegativeAgeOffset {
        vaccine_id: VaccineId,
        dose_number: u32,
        days: i64,
    },

    /// Dose numbers start at 1
    #[error("{vaccine_id}: dose number must be at least 1, got {dose_number}")]
    InvalidDoseNumber {
        vaccine_id: VaccineId,
        dose_number: u32,
    },

    /// The same dose appears twice in one series
    #[error("{vaccine_id}: dose {dose_number} is defined more than once")]
    DuplicateDose {
        vaccine_id: VaccineId,
        dose_number: u32,
    },

    /// Dose numbers are not strictly increasing in recommended-age order
    #[error(
        "{vaccine_id}: dose {previous_dose} ({previous_age_days} days) is recommended before dose {dose_number} ({age_days} days)"
    )]
    NonMonotonicDoses {
        vaccine_id: VaccineId,
        previous_dose: u32,
        previous_age_days: i64,
        dose_number: u32,
        age_days: i64,
    },

    /// A recommended age range ends before it starts
    #[error("{vaccine_id} dose {dose_number}: age range ends ({end_days} days) before it starts ({start_days} days)")]
    InvalidAgeRange {
        vaccine_id: VaccineId,
        dose_number: u32,
        start_days: i64,
        end_days: i64,
    },

    /// An age description could not be parsed
    #[error("Unrecognized age description '{0}'")]
    InvalidAge(String),

    /// A dose has neither an age description nor an explicit day offset
    #[error("{vaccine_id} dose {dose_number}: no recommended age given")]
    MissingAge {
        vaccine_id: VaccineId,
        dose_number: u32,
    },

    /// A required text field is blank
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
}

// Conversion from std::io::Error
impl From<std::io::Error> for ImmunizeError {
    fn from(err: std::io::Error) -> Self {
        ImmunizeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ImmunizeError {
    fn from(err: serde_json::Error) -> Self {
        ImmunizeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ImmunizeError {
    fn from(err: toml::de::Error) -> Self {
        ImmunizeError::Configuration(format!("TOML parse error: {err}"))
    }
}
