//! Core business logic for Immunize.
//!
//! # Modules
//!
//! - [`catalog`] - Vaccine catalog loading, validation and fingerprinting
//! - [`schedule`] - Schedule generation, completion tracking, status and statistics
//!
//! # Schedule Workflow
//!
//! 1. **Load Catalog**: built-in, or a JSON/TOML file named in the configuration
//! 2. **Generate**: expand the catalog for a child's birth date
//! 3. **Apply Completions**: mark doses the caller has recorded
//! 4. **Evaluate**: classify entries and find active reminders at "now"
//! 5. **Report**: statistics, unmatched completions and data-quality issues

pub mod catalog;
pub mod schedule;
