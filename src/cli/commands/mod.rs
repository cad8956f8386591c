//! CLI command implementations
//!
//! Commands return an exit code: 0 on success, 2 for configuration or
//! catalog problems, 3 for invalid input, 5 for anything fatal.

pub mod init;
pub mod schedule;
pub mod stats;
pub mod validate;

use crate::config::{load_config_or_default, ImmunizeConfig};
use crate::core::catalog::{load_catalog, VaccineCatalog};
use crate::core::schedule::{CompletionRecord, CompletionSet, ScheduleEngine, ScheduleReport};
use crate::domain::{Child, ChildId, Gender, ImmunizeError, Result};
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_INVALID_INPUT: i32 = 3;
pub const EXIT_FATAL: i32 = 5;

/// Child and date inputs shared by the schedule commands
#[derive(Args, Debug, Clone)]
pub struct ChildArgs {
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: NaiveDate,

    /// Evaluate as of this date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub now: Option<NaiveDate>,

    /// JSON file of completion records
    #[arg(long)]
    pub completions: Option<PathBuf>,

    /// Child's gender (male, female); gender-specific doses are filtered
    #[arg(long)]
    pub gender: Option<Gender>,

    /// Identifier echoed in the report
    #[arg(long, default_value = "child")]
    pub child_id: ChildId,
}

impl ChildArgs {
    fn child(&self) -> Child {
        Child {
            id: self.child_id.clone(),
            birth_date: self.birth_date,
            gender: self.gender,
        }
    }

    fn as_of(&self) -> NaiveDate {
        self.now
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Loads config, catalog and completions, and builds the report
    pub(crate) async fn build_report(&self, config_path: &str) -> Result<ScheduleReport> {
        let config = load_config_or_default(config_path)?;
        let engine = build_engine(&config)?;
        let completions = match &self.completions {
            Some(path) => load_completions(path).await?,
            None => CompletionSet::new(),
        };

        engine.report(&self.child(), &completions, self.as_of())
    }
}

/// Resolves the configured catalog
pub(crate) fn resolve_catalog(config: &ImmunizeConfig) -> Result<VaccineCatalog> {
    match &config.catalog.path {
        Some(path) => load_catalog(path),
        None => VaccineCatalog::builtin(),
    }
}

/// Builds a schedule engine from configuration
pub(crate) fn build_engine(config: &ImmunizeConfig) -> Result<ScheduleEngine> {
    let catalog = resolve_catalog(config)?;
    Ok(ScheduleEngine::new(catalog, config.schedule.to_settings())?
        .with_include_optional(config.catalog.include_optional))
}

/// Reads completion records from a JSON file
pub(crate) async fn load_completions(path: &Path) -> Result<CompletionSet> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        ImmunizeError::Validation(format!(
            "Failed to read completions file {}: {}",
            path.display(),
            e
        ))
    })?;

    let records: Vec<CompletionRecord> = serde_json::from_str(&contents).map_err(|e| {
        ImmunizeError::Validation(format!(
            "Invalid completions file {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), records = records.len(), "Completions loaded");

    Ok(CompletionSet::from_records(records))
}

/// Maps an error to the process exit code
pub fn exit_code_for(error: &ImmunizeError) -> i32 {
    match error {
        ImmunizeError::InvalidCatalog(_) | ImmunizeError::Configuration(_) => EXIT_CONFIG,
        ImmunizeError::InvalidChild(_) | ImmunizeError::Validation(_) => EXIT_INVALID_INPUT,
        _ => EXIT_FATAL,
    }
}

/// Logs and prints a command error, returning its exit code
pub(crate) fn report_error(error: &ImmunizeError, context: &str) -> i32 {
    crate::log_error_with_context!(error, context);
    eprintln!("❌ {context}");
    eprintln!("   Error: {error}");
    exit_code_for(error)
}
