//! Schedule queries
//!
//! Both views select by [`classify`], so an entry is never reported as
//! upcoming and overdue at once.

use super::status::classify;
use crate::domain::{ScheduleEntry, ScheduleStatus};
use chrono::NaiveDate;

/// Incomplete entries due after `now` and no later than `now + days_ahead`
pub fn upcoming(schedule: &[ScheduleEntry], now: NaiveDate, days_ahead: u32) -> Vec<&ScheduleEntry> {
    schedule
        .iter()
        .filter(|entry| classify(entry, now, days_ahead) == ScheduleStatus::Upcoming)
        .collect()
}

/// Incomplete entries due on or before `now`
///
/// With `mandatory_only`, optional doses are left out.
pub fn overdue(schedule: &[ScheduleEntry], now: NaiveDate, mandatory_only: bool) -> Vec<&ScheduleEntry> {
    schedule
        .iter()
        .filter(|entry| classify(entry, now, 0) == ScheduleStatus::Overdue)
        .filter(|entry| !mandatory_only || entry.is_mandatory)
        .collect()
}
