//! Domain models and types for Immunize.
//!
//! This module contains the plain data the schedule engine consumes and
//! produces. Nothing here performs I/O or reads the clock.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`VaccineId`], [`ChildId`])
//! - **Catalog entries** ([`VaccineDefinition`]) and age parsing ([`RecommendedAge`])
//! - **Schedule output** ([`ScheduleEntry`], [`ScheduleStatus`], [`OccurrenceKey`])
//! - **Error types** ([`ImmunizeError`], [`CatalogError`])
//! - **Result type alias** ([`Result`])
//!
//! # Builder Pattern
//!
//! ```rust
//! use immunize::domain::VaccineDefinition;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dose = VaccineDefinition::builder()
//!     .vaccine_id("hepb")
//!     .name("Hepatitis B")
//!     .disease("Hepatitis B")
//!     .dose_number(1)
//!     .age_description("at birth")
//!     .mandatory(true)
//!     .build()?;
//! assert_eq!(dose.recommended_age_days, 0);
//! # Ok(())
//! # }
//! ```

pub mod age;
pub mod child;
pub mod entry;
pub mod errors;
pub mod ids;
pub mod result;
pub mod vaccine;

// Re-export commonly used types for convenience
pub use age::RecommendedAge;
pub use child::Child;
pub use entry::{OccurrenceKey, ScheduleEntry, ScheduleStatus};
pub use errors::{CatalogError, ImmunizeError};
pub use ids::{ChildId, VaccineId};
pub use result::Result;
pub use vaccine::{Gender, VaccineDefinition, VaccineDefinitionBuilder};
