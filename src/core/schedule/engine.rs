//! Schedule engine facade
//!
//! Binds a catalog and settings together so callers do not have to thread
//! them through every call. The engine holds no mutable state: it is `Send +
//! Sync` and may be shared across threads behind an `Arc`.

use super::audit::{audit_completions, DataQualityIssue};
use super::completion::{apply_completions, CompletionSet, CompletionWarning};
use super::generator::generate_filtered;
use super::settings::{GenerationFilter, ScheduleSettings};
use super::stats::{compute_stats, ScheduleStats};
use super::status::{evaluate, EntryView};
use crate::core::catalog::VaccineCatalog;
use crate::domain::{Child, ChildId, Result, ScheduleEntry, ScheduleStatus};
use chrono::NaiveDate;
use serde::Serialize;

/// A catalog plus the settings schedules are computed with
#[derive(Debug, Clone)]
pub struct ScheduleEngine {
    catalog: VaccineCatalog,
    settings: ScheduleSettings,
    include_optional: bool,
    fingerprint: String,
}

impl ScheduleEngine {
    /// Creates an engine, validating and fingerprinting the catalog once
    pub fn new(catalog: VaccineCatalog, settings: ScheduleSettings) -> Result<Self> {
        catalog.validate()?;
        let fingerprint = catalog.fingerprint()?;

        tracing::debug!(
            definitions = catalog.len(),
            version = catalog.version().unwrap_or("unversioned"),
            fingerprint = %fingerprint,
            "Schedule engine ready"
        );

        Ok(Self {
            catalog,
            settings,
            include_optional: true,
            fingerprint,
        })
    }

    /// Whether optional doses are scheduled (default true)
    pub fn with_include_optional(mut self, include_optional: bool) -> Self {
        self.include_optional = include_optional;
        self
    }

    pub fn catalog(&self) -> &VaccineCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &ScheduleSettings {
        &self.settings
    }

    /// Fingerprint of the bound catalog
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    fn filter_for(&self, child: &Child) -> GenerationFilter {
        GenerationFilter {
            include_optional: self.include_optional,
            gender: child.gender,
        }
    }

    /// Generates the child's schedule with no completions applied
    pub fn generate(&self, child: &Child, now: NaiveDate) -> Result<Vec<ScheduleEntry>> {
        let schedule = generate_filtered(
            child.birth_date,
            &self.catalog,
            now,
            &self.settings,
            &self.filter_for(child),
        )?;

        tracing::debug!(
            child_id = %child.id,
            entries = schedule.len(),
            catalog = %self.fingerprint,
            "Generated schedule for child"
        );

        Ok(schedule)
    }

    /// Generates, applies completions, audits and classifies in one pass
    pub fn report(
        &self,
        child: &Child,
        completions: &CompletionSet,
        now: NaiveDate,
    ) -> Result<ScheduleReport> {
        let schedule = self.generate(child, now)?;
        let outcome = apply_completions(schedule, completions);

        let window = self.settings.upcoming_window_days;
        let data_quality = audit_completions(
            &outcome.schedule,
            now,
            self.settings.future_completion_tolerance_days,
        );

        Ok(ScheduleReport {
            child_id: child.id.clone(),
            birth_date: child.birth_date,
            as_of: now,
            catalog_version: self.catalog.version().map(str::to_owned),
            catalog_fingerprint: self.fingerprint.clone(),
            stats: compute_stats(&outcome.schedule, now, window),
            entries: evaluate(&outcome.schedule, now, window),
            warnings: outcome.warnings,
            data_quality,
        })
    }
}

/// Everything a renderer needs for one child at one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub child_id: ChildId,
    pub birth_date: NaiveDate,
    pub as_of: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<String>,
    pub catalog_fingerprint: String,

    pub stats: ScheduleStats,
    pub entries: Vec<EntryView>,
    pub warnings: Vec<CompletionWarning>,
    pub data_quality: Vec<DataQualityIssue>,
}

impl ScheduleReport {
    /// Entries currently in the given status
    pub fn with_status(&self, status: ScheduleStatus) -> impl Iterator<Item = &EntryView> {
        self.entries.iter().filter(move |view| view.status == status)
    }

    /// Entries whose reminder is active
    pub fn reminders(&self) -> impl Iterator<Item = &EntryView> {
        self.entries.iter().filter(|view| view.notification_due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, OccurrenceKey, VaccineDefinition, VaccineId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dose(id: &str, dose_number: u32, days: i64) -> VaccineDefinition {
        VaccineDefinition::builder()
            .vaccine_id(id)
            .name(id.to_uppercase())
            .dose_number(dose_number)
            .age_days(days)
            .mandatory(true)
            .build()
            .unwrap()
    }

    fn engine() -> ScheduleEngine {
        let mut rv = dose("rv", 1, 60);
        rv.is_mandatory = false;
        let mut hpv = dose("hpv", 1, 4380);
        hpv.gender = Some(Gender::Female);

        let catalog = VaccineCatalog::new(vec![dose("hepb", 1, 0), dose("hepb", 2, 30), rv, hpv])
            .unwrap()
            .with_version("t1");
        ScheduleEngine::new(catalog, ScheduleSettings::default()).unwrap()
    }

    fn child() -> Child {
        Child::new(ChildId::new("c-1").unwrap(), date(2024, 1, 15))
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScheduleEngine>();
        assert_send_sync::<ScheduleReport>();
    }

    #[test]
    fn test_new_rejects_invalid_catalog() {
        let catalog = VaccineCatalog::from_definitions(vec![dose("x", 1, 10), dose("x", 1, 20)]);
        assert!(ScheduleEngine::new(catalog, ScheduleSettings::default()).is_err());
    }

    #[test]
    fn test_generate_applies_child_gender() {
        let engine = engine();
        let now = date(2024, 1, 20);

        let boy = child().with_gender(Gender::Male);
        assert_eq!(engine.generate(&boy, now).unwrap().len(), 3);

        let girl = child().with_gender(Gender::Female);
        assert_eq!(engine.generate(&girl, now).unwrap().len(), 4);
    }

    #[test]
    fn test_include_optional_off() {
        let engine = engine().with_include_optional(false);
        let schedule = engine.generate(&child(), date(2024, 1, 20)).unwrap();
        assert!(schedule.iter().all(|e| e.is_mandatory));
    }

    #[test]
    fn test_report() {
        let engine = engine();
        let mut completions = CompletionSet::new();
        completions.insert(
            OccurrenceKey::new(VaccineId::new("hepb").unwrap(), 1),
            date(2024, 1, 15),
        );
        completions.insert(
            OccurrenceKey::new(VaccineId::new("gone").unwrap(), 1),
            date(2024, 1, 15),
        );

        let report = engine.report(&child(), &completions, date(2024, 1, 20)).unwrap();
        assert_eq!(report.catalog_version.as_deref(), Some("t1"));
        assert_eq!(report.catalog_fingerprint, engine.fingerprint());
        assert_eq!(report.stats.total, 4);
        assert_eq!(report.stats.completed, 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.data_quality.is_empty());
        assert_eq!(report.with_status(ScheduleStatus::Completed).count(), 1);
        // hepb-2 due 2024-02-14, reminder from 2024-01-15
        assert_eq!(report.reminders().count(), 1);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["child_id"], "c-1");
        assert_eq!(json["stats"]["completion_rate"], 25);
    }
}
