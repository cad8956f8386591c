//! Schedule entry domain model
//!
//! A [`ScheduleEntry`] is one dose instance on one child's schedule. Entries
//! are derived from the catalog on demand and are never the unit of storage:
//! only completion dates, keyed by [`OccurrenceKey`], are persisted by the
//! caller.

use super::ids::VaccineId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifies one dose instance across catalog reloads
///
/// An absent `occurrence_year` and year `0` denote the same occurrence, so a
/// completion recorded without a year matches the only occurrence of a
/// one-off dose and the first occurrence of an annual one. Equality, ordering
/// and hashing all follow that rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceKey {
    pub vaccine_id: VaccineId,
    pub dose_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_year: Option<u32>,
}

impl OccurrenceKey {
    /// Key for a one-off dose
    pub fn new(vaccine_id: VaccineId, dose_number: u32) -> Self {
        Self {
            vaccine_id,
            dose_number,
            occurrence_year: None,
        }
    }

    /// Key for the `year`-th recurrence of an annual dose
    pub fn annual(vaccine_id: VaccineId, dose_number: u32, year: u32) -> Self {
        Self {
            vaccine_id,
            dose_number,
            occurrence_year: Some(year),
        }
    }

    /// Recurrence index, treating an absent year as 0
    pub fn year_index(&self) -> u32 {
        self.occurrence_year.unwrap_or(0)
    }

    fn sort_key(&self) -> (&VaccineId, u32, u32) {
        (&self.vaccine_id, self.dose_number, self.year_index())
    }
}

impl PartialEq for OccurrenceKey {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for OccurrenceKey {}

impl PartialOrd for OccurrenceKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OccurrenceKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for OccurrenceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl fmt::Display for OccurrenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dose {}", self.vaccine_id, self.dose_number)?;
        if let Some(year) = self.occurrence_year {
            write!(f, " (year {year})")?;
        }
        Ok(())
    }
}

/// Derived state of a schedule entry at a given date
///
/// Never stored. Recomputed from `due_date`, `completed_date` and "now" every
/// time it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// A completion has been recorded; terminal
    Completed,
    /// Due today or earlier and not completed
    Overdue,
    /// Due within the upcoming window
    Upcoming,
    /// Due after the upcoming window
    Scheduled,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Overdue => "overdue",
            ScheduleStatus::Upcoming => "upcoming",
            ScheduleStatus::Scheduled => "scheduled",
        };
        f.write_str(label)
    }
}

/// One dose instance on a child's schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Unique within the schedule: `{vaccine_id}-{dose}` or `{vaccine_id}-{dose}-y{k}`
    pub id: String,

    pub vaccine_id: VaccineId,
    pub vaccine_name: String,
    pub disease: String,
    pub dose_number: u32,

    /// Recurrence index for annual doses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_year: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_description: Option<String>,

    pub is_mandatory: bool,
    pub is_annual: bool,

    /// Date the dose is recommended
    pub due_date: NaiveDate,

    /// Close of the recommended window for range-based doses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_window_end: Option<NaiveDate>,

    /// Date from which a reminder should be shown
    pub notification_date: NaiveDate,

    /// Set iff the dose was recorded as administered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl ScheduleEntry {
    /// Builds the schedule-unique entry id
    pub fn make_id(vaccine_id: &VaccineId, dose_number: u32, occurrence_year: Option<u32>) -> String {
        match occurrence_year {
            Some(year) => format!("{vaccine_id}-{dose_number}-y{year}"),
            None => format!("{vaccine_id}-{dose_number}"),
        }
    }

    /// Completion key for this entry
    pub fn key(&self) -> OccurrenceKey {
        OccurrenceKey {
            vaccine_id: self.vaccine_id.clone(),
            dose_number: self.dose_number,
            occurrence_year: self.occurrence_year,
        }
    }

    /// Whether a completion has been recorded
    pub fn is_completed(&self) -> bool {
        self.completed_date.is_some()
    }

    /// Records administration of this dose
    pub fn mark_completed(&mut self, date: NaiveDate) {
        self.completed_date = Some(date);
    }

    /// Removes a recorded completion; returns whether one was present
    pub fn unmark(&mut self) -> bool {
        self.completed_date.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn vid(id: &str) -> VaccineId {
        VaccineId::new(id).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_occurrence_key_absent_year_equals_year_zero() {
        let plain = OccurrenceKey::new(vid("flu"), 1);
        let year_zero = OccurrenceKey::annual(vid("flu"), 1, 0);
        let year_one = OccurrenceKey::annual(vid("flu"), 1, 1);

        assert_eq!(plain, year_zero);
        assert_ne!(plain, year_one);

        let mut map = BTreeMap::new();
        map.insert(plain, "first");
        assert_eq!(map.get(&year_zero), Some(&"first"));
        assert!(map.get(&year_one).is_none());
    }

    #[test]
    fn test_occurrence_key_ordering() {
        let mut keys = vec![
            OccurrenceKey::annual(vid("flu"), 1, 2),
            OccurrenceKey::new(vid("dtap"), 2),
            OccurrenceKey::new(vid("dtap"), 1),
            OccurrenceKey::annual(vid("flu"), 1, 0),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["dtap dose 1", "dtap dose 2", "flu dose 1 (year 0)", "flu dose 1 (year 2)"]
        );
    }

    #[test]
    fn test_make_id() {
        assert_eq!(ScheduleEntry::make_id(&vid("hepb"), 2, None), "hepb-2");
        assert_eq!(ScheduleEntry::make_id(&vid("flu"), 1, Some(3)), "flu-1-y3");
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut entry = ScheduleEntry {
            id: "hepb-1".to_string(),
            vaccine_id: vid("hepb"),
            vaccine_name: "HepB".to_string(),
            disease: "Hepatitis B".to_string(),
            dose_number: 1,
            occurrence_year: None,
            age_description: None,
            is_mandatory: true,
            is_annual: false,
            due_date: date(2024, 1, 15),
            due_window_end: None,
            notification_date: date(2023, 12, 16),
            completed_date: None,
            notes: String::new(),
        };

        assert!(!entry.is_completed());
        entry.mark_completed(date(2024, 1, 16));
        assert!(entry.is_completed());
        assert!(entry.unmark());
        assert!(!entry.is_completed());
        assert!(!entry.unmark());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&ScheduleStatus::Overdue).unwrap(),
            "\"overdue\""
        );
        assert_eq!(ScheduleStatus::Upcoming.to_string(), "upcoming");
    }
}
