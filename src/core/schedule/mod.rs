//! Schedule computation
//!
//! Every function here is pure: given the same birth date, catalog,
//! completions, settings and "now", it returns the same result. "Now" is
//! always an argument; nothing in this module reads the clock.
//!
//! # Workflow
//!
//! 1. **Generate**: expand the catalog into dated entries for one birth date
//! 2. **Apply completions**: mark entries whose key has a recorded date
//! 3. **Classify**: derive status and reminder state at "now"
//! 4. **Summarize**: count statuses and audit suspicious completions
//!
//! # Example
//!
//! ```rust
//! use immunize::core::catalog::VaccineCatalog;
//! use immunize::core::schedule::{ScheduleEngine, ScheduleSettings, CompletionSet};
//! use immunize::domain::{Child, ChildId};
//! use chrono::NaiveDate;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ScheduleEngine::new(VaccineCatalog::builtin()?, ScheduleSettings::default())?;
//! let child = Child::new(ChildId::new("c-1")?, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
//! let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//! let report = engine.report(&child, &CompletionSet::new(), now)?;
//! println!("{} doses, {} overdue", report.stats.total, report.stats.overdue);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod completion;
pub mod engine;
pub mod generator;
pub mod query;
pub mod settings;
pub mod stats;
pub mod status;

pub use audit::{audit_completions, DataQualityIssue};
pub use completion::{
    apply_completions, unmark_completion, CompletionOutcome, CompletionRecord, CompletionSet,
    CompletionWarning,
};
pub use engine::{ScheduleEngine, ScheduleReport};
pub use generator::{generate_filtered, generate_schedule, sort_schedule};
pub use query::{overdue, upcoming};
pub use settings::{GenerationFilter, ScheduleSettings};
pub use stats::{compute_stats, ScheduleStats};
pub use status::{classify, evaluate, notification_due_now, pending_notifications, EntryView};
