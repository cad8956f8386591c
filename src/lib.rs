//! # Immunize - Vaccination Schedule Engine
//!
//! Immunize derives a child's vaccination schedule from a birth date and a
//! vaccine catalog, tracks which doses have been administered, and reports
//! what is overdue, upcoming and due for a reminder.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Generating** dated dose entries from a catalog, including annual recurrences
//! - **Tracking** completions keyed so they survive catalog reloads
//! - **Classifying** entries as completed, overdue, upcoming or scheduled
//! - **Summarizing** a schedule into statistics and data-quality findings
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (catalog, schedule)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use immunize::core::catalog::VaccineCatalog;
//! use immunize::core::schedule::{generate_schedule, compute_stats, ScheduleSettings};
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = VaccineCatalog::builtin()?;
//! let settings = ScheduleSettings::default();
//!
//! let birth = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//! let schedule = generate_schedule(birth, &catalog, today, &settings)?;
//! let stats = compute_stats(&schedule, today, settings.upcoming_window_days);
//! println!("{} of {} doses overdue", stats.overdue, stats.total);
//! # Ok(())
//! # }
//! ```
//!
//! ## Completions
//!
//! Completion records are plain data owned by the caller. Applying them is
//! idempotent and never clears an existing completion:
//!
//! ```rust
//! use immunize::core::catalog::VaccineCatalog;
//! use immunize::core::schedule::{apply_completions, generate_schedule, CompletionSet, ScheduleSettings};
//! use immunize::domain::{OccurrenceKey, VaccineId};
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = VaccineCatalog::builtin()?;
//! let birth = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! let schedule = generate_schedule(birth, &catalog, birth, &ScheduleSettings::default())?;
//!
//! let mut completions = CompletionSet::new();
//! completions.insert(OccurrenceKey::new(VaccineId::new("hepb")?, 1), birth);
//!
//! let outcome = apply_completions(schedule, &completions);
//! assert!(outcome.warnings.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::ImmunizeError`]. Catalog problems surface as
//! [`domain::ImmunizeError::InvalidCatalog`] carrying a [`domain::CatalogError`].
//!
//! ## Logging
//!
//! Immunize uses structured logging with the `tracing` crate; see [`logging`].

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
