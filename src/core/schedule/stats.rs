//! Schedule statistics

use super::status::classify;
use crate::domain::{ScheduleEntry, ScheduleStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status counts for a schedule at one date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Number of entries
    pub total: usize,

    pub completed: usize,
    pub upcoming: usize,
    pub overdue: usize,
    pub scheduled: usize,

    /// Completed share of all entries, rounded to the nearest whole percent
    /// (halves round up); 0 for an empty schedule
    pub completion_rate: u32,
}

impl ScheduleStats {
    /// Whether every entry has been completed
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    /// Log the statistics
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            completed = self.completed,
            upcoming = self.upcoming,
            overdue = self.overdue,
            scheduled = self.scheduled,
            completion_rate = format!("{}%", self.completion_rate),
            "Schedule statistics"
        );

        if self.overdue > 0 {
            tracing::warn!(overdue = self.overdue, "Schedule has overdue doses");
        }
    }

    fn record(&mut self, status: ScheduleStatus) {
        match status {
            ScheduleStatus::Completed => self.completed += 1,
            ScheduleStatus::Overdue => self.overdue += 1,
            ScheduleStatus::Upcoming => self.upcoming += 1,
            ScheduleStatus::Scheduled => self.scheduled += 1,
        }
    }
}

/// Counts entries by status at `now`
///
/// Every entry falls into exactly one bucket, so
/// `completed + upcoming + overdue + scheduled == total`.
pub fn compute_stats(
    schedule: &[ScheduleEntry],
    now: NaiveDate,
    upcoming_window_days: u32,
) -> ScheduleStats {
    let mut stats = ScheduleStats {
        total: schedule.len(),
        ..ScheduleStats::default()
    };

    for entry in schedule {
        stats.record(classify(entry, now, upcoming_window_days));
    }

    stats.completion_rate = completion_rate(stats.completed, stats.total);
    stats
}

fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = completed as u64;
    let total = total as u64;
    ((completed * 100 + total / 2) / total) as u32
}
