//! Data-quality checks on recorded completions
//!
//! These never alter the schedule. A suspicious completion is kept exactly
//! as recorded and reported next to it.

use crate::domain::ScheduleEntry;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Something about a completion that deserves a human look
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataQualityIssue {
    /// Completion date lies further in the future than the tolerance allows
    CompletionFarInFuture {
        entry_id: String,
        completed_date: NaiveDate,
        days_ahead: i64,
    },
}

impl fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityIssue::CompletionFarInFuture {
                entry_id,
                completed_date,
                days_ahead,
            } => write!(
                f,
                "{entry_id}: completed on {completed_date}, {days_ahead} days in the future"
            ),
        }
    }
}

/// Flags completions dated more than `tolerance_days` after `now`
pub fn audit_completions(
    schedule: &[ScheduleEntry],
    now: NaiveDate,
    tolerance_days: u32,
) -> Vec<DataQualityIssue> {
    schedule
        .iter()
        .filter_map(|entry| {
            let completed_date = entry.completed_date?;
            let days_ahead = (completed_date - now).num_days();
            (days_ahead > i64::from(tolerance_days)).then(|| {
                tracing::warn!(
                    entry_id = %entry.id,
                    completed_date = %completed_date,
                    days_ahead,
                    "Completion recorded far in the future"
                );
                DataQualityIssue::CompletionFarInFuture {
                    entry_id: entry.id.clone(),
                    completed_date,
                    days_ahead,
                }
            })
        })
        .collect()
}
