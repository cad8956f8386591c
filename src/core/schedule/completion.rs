//! Completion records
//!
//! Completions are the only persistent per-child state. They are keyed by
//! [`OccurrenceKey`] so they survive catalog reloads and schedule
//! regeneration: applying the same completions to a freshly generated
//! schedule reproduces the same completed entries.

use crate::domain::{OccurrenceKey, ScheduleEntry, VaccineId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A dose recorded as administered, as read from a caller's store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub vaccine_id: VaccineId,
    pub dose_number: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_year: Option<u32>,

    pub completed_date: NaiveDate,
}

impl CompletionRecord {
    pub fn key(&self) -> OccurrenceKey {
        OccurrenceKey {
            vaccine_id: self.vaccine_id.clone(),
            dose_number: self.dose_number,
            occurrence_year: self.occurrence_year,
        }
    }
}

/// Completion dates keyed by occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    completions: BTreeMap<OccurrenceKey, NaiveDate>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from stored records
    ///
    /// When two records share a key the later one wins.
    pub fn from_records(records: impl IntoIterator<Item = CompletionRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            let key = record.key();
            if let Some(previous) = set.insert(key.clone(), record.completed_date) {
                tracing::warn!(
                    occurrence = %key,
                    previous = %previous,
                    replacement = %record.completed_date,
                    "Duplicate completion record; keeping the later one"
                );
            }
        }
        set
    }

    /// Records a completion, returning the date it replaced
    ///
    /// The stored key is replaced along with the date, so a later record
    /// spelled `occurrence_year: 0` overrides an earlier one without a year.
    pub fn insert(&mut self, key: OccurrenceKey, date: NaiveDate) -> Option<NaiveDate> {
        let previous = self.completions.remove(&key);
        self.completions.insert(key, date);
        previous
    }

    pub fn remove(&mut self, key: &OccurrenceKey) -> Option<NaiveDate> {
        self.completions.remove(key)
    }

    pub fn get(&self, key: &OccurrenceKey) -> Option<NaiveDate> {
        self.completions.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.completions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OccurrenceKey, NaiveDate)> {
        self.completions.iter().map(|(k, d)| (k, *d))
    }

    /// Converts back to storable records, in key order
    pub fn to_records(&self) -> Vec<CompletionRecord> {
        self.iter()
            .map(|(key, completed_date)| CompletionRecord {
                vaccine_id: key.vaccine_id.clone(),
                dose_number: key.dose_number,
                occurrence_year: key.occurrence_year,
                completed_date,
            })
            .collect()
    }
}

impl FromIterator<CompletionRecord> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = CompletionRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

/// Non-fatal problem found while applying completions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionWarning {
    /// No entry in the schedule carries this key
    Unmatched {
        occurrence: OccurrenceKey,
        completed_date: NaiveDate,
    },
}

impl fmt::Display for CompletionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionWarning::Unmatched {
                occurrence,
                completed_date,
            } => write!(
                f,
                "completion of {occurrence} on {completed_date} matches no schedule entry"
            ),
        }
    }
}

/// Schedule with completions applied, plus anything that did not match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub schedule: Vec<ScheduleEntry>,
    pub warnings: Vec<CompletionWarning>,
}

impl CompletionOutcome {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Marks entries completed from a completion set
///
/// An entry whose key is in the set takes the recorded date. Entries whose
/// key is absent keep whatever completion they already had, so applying an
/// empty set is a no-op and applying the same set twice changes nothing the
/// second time. Completions that match no entry are reported as warnings and
/// otherwise ignored.
pub fn apply_completions(
    mut schedule: Vec<ScheduleEntry>,
    completions: &CompletionSet,
) -> CompletionOutcome {
    let mut matched = BTreeSet::new();

    for entry in &mut schedule {
        let key = entry.key();
        if let Some(date) = completions.get(&key) {
            entry.mark_completed(date);
            matched.insert(key);
        }
    }

    let warnings: Vec<CompletionWarning> = completions
        .iter()
        .filter(|(key, _)| !matched.contains(*key))
        .map(|(key, completed_date)| {
            crate::log_unmatched_completion!(key, completed_date);
            CompletionWarning::Unmatched {
                occurrence: key.clone(),
                completed_date,
            }
        })
        .collect();

    CompletionOutcome { schedule, warnings }
}

/// Clears the completion of one entry
///
/// Returns `true` if an entry with the key existed and was completed.
/// Undoing a completion is an explicit action; [`apply_completions`] never
/// does it.
pub fn unmark_completion(schedule: &mut [ScheduleEntry], key: &OccurrenceKey) -> bool {
    schedule
        .iter_mut()
        .find(|entry| &entry.key() == key)
        .map(ScheduleEntry::unmark)
        .unwrap_or(false)
}
