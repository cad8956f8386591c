//! Status derivation
//!
//! Status is a function of an entry and "now". Nothing here is cached;
//! callers re-evaluate whenever the date changes.

use crate::domain::{ScheduleEntry, ScheduleStatus};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Derives the status of an entry at `now`
///
/// Precedence: a recorded completion always wins; otherwise an entry due on
/// or before `now` is overdue; otherwise it is upcoming when due within
/// `upcoming_window_days` of `now`, and scheduled beyond that.
pub fn classify(entry: &ScheduleEntry, now: NaiveDate, upcoming_window_days: u32) -> ScheduleStatus {
    if entry.completed_date.is_some() {
        return ScheduleStatus::Completed;
    }

    if entry.due_date <= now {
        return ScheduleStatus::Overdue;
    }

    if entry.due_date <= window_end(now, upcoming_window_days) {
        ScheduleStatus::Upcoming
    } else {
        ScheduleStatus::Scheduled
    }
}

/// Whether a reminder should be active for the entry at `now`
///
/// True from the notification date up to, but not including, the due date.
/// Once an entry is overdue it is no longer a reminder.
pub fn notification_due_now(entry: &ScheduleEntry, now: NaiveDate) -> bool {
    !entry.is_completed() && entry.notification_date <= now && now < entry.due_date
}

/// Entries with an active reminder, in schedule order
pub fn pending_notifications(schedule: &[ScheduleEntry], now: NaiveDate) -> Vec<&ScheduleEntry> {
    schedule
        .iter()
        .filter(|entry| notification_due_now(entry, now))
        .collect()
}

/// An entry together with its derived state at one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    #[serde(flatten)]
    pub entry: ScheduleEntry,
    pub status: ScheduleStatus,
    pub notification_due: bool,
}

/// Evaluates every entry of a schedule at `now`
pub fn evaluate(schedule: &[ScheduleEntry], now: NaiveDate, upcoming_window_days: u32) -> Vec<EntryView> {
    schedule
        .iter()
        .map(|entry| EntryView {
            entry: entry.clone(),
            status: classify(entry, now, upcoming_window_days),
            notification_due: notification_due_now(entry, now),
        })
        .collect()
}

fn window_end(now: NaiveDate, days: u32) -> NaiveDate {
    now.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VaccineId;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(due: NaiveDate, notify: NaiveDate) -> ScheduleEntry {
        let vaccine_id = VaccineId::new("dtap").unwrap();
        ScheduleEntry {
            id: ScheduleEntry::make_id(&vaccine_id, 1, None),
            vaccine_id,
            vaccine_name: "DTaP".to_string(),
            disease: String::new(),
            dose_number: 1,
            occurrence_year: None,
            age_description: None,
            is_mandatory: true,
            is_annual: false,
            due_date: due,
            due_window_end: None,
            notification_date: notify,
            completed_date: None,
            notes: String::new(),
        }
    }

    // due 2024-03-15, window 60 days
    #[test_case(date(2024, 3, 20), ScheduleStatus::Overdue ; "after due")]
    #[test_case(date(2024, 3, 15), ScheduleStatus::Overdue ; "on due date")]
    #[test_case(date(2024, 3, 14), ScheduleStatus::Upcoming ; "day before due")]
    #[test_case(date(2024, 1, 15), ScheduleStatus::Upcoming ; "exactly window days before")]
    #[test_case(date(2024, 1, 14), ScheduleStatus::Scheduled ; "beyond window")]
    fn test_classify_pending(now: NaiveDate, expected: ScheduleStatus) {
        let e = entry(date(2024, 3, 15), date(2024, 2, 14));
        assert_eq!(classify(&e, now, 60), expected);
    }

    #[test]
    fn test_completed_wins() {
        let mut e = entry(date(2024, 3, 15), date(2024, 2, 14));
        e.mark_completed(date(2024, 4, 1));
        assert_eq!(classify(&e, date(2025, 1, 1), 60), ScheduleStatus::Completed);
        assert_eq!(classify(&e, date(2020, 1, 1), 60), ScheduleStatus::Completed);
    }

    #[test]
    fn test_zero_window_never_upcoming() {
        let e = entry(date(2024, 3, 15), date(2024, 2, 14));
        assert_eq!(classify(&e, date(2024, 3, 14), 0), ScheduleStatus::Scheduled);
    }

    #[test_case(date(2024, 2, 13), false ; "before notification date")]
    #[test_case(date(2024, 2, 14), true ; "on notification date")]
    #[test_case(date(2024, 3, 14), true ; "day before due")]
    #[test_case(date(2024, 3, 15), false ; "on due date")]
    fn test_notification_due_now(now: NaiveDate, expected: bool) {
        let e = entry(date(2024, 3, 15), date(2024, 2, 14));
        assert_eq!(notification_due_now(&e, now), expected);
    }

    #[test]
    fn test_no_notification_once_completed() {
        let mut e = entry(date(2024, 3, 15), date(2024, 2, 14));
        e.mark_completed(date(2024, 2, 20));
        assert!(!notification_due_now(&e, date(2024, 3, 1)));
    }

    #[test]
    fn test_pending_notifications_and_evaluate() {
        let schedule = vec![
            entry(date(2024, 3, 15), date(2024, 2, 14)),
            entry(date(2024, 9, 15), date(2024, 8, 16)),
        ];
        let now = date(2024, 3, 1);

        let pending = pending_notifications(&schedule, now);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].due_date, date(2024, 3, 15));

        let views = evaluate(&schedule, now, 60);
        assert_eq!(views[0].status, ScheduleStatus::Upcoming);
        assert!(views[0].notification_due);
        assert_eq!(views[1].status, ScheduleStatus::Scheduled);
        assert!(!views[1].notification_due);

        let json = serde_json::to_value(&views[0]).unwrap();
        assert_eq!(json["status"], "upcoming");
        assert_eq!(json["id"], "dtap-1");
    }

    #[test]
    fn test_window_end_saturates() {
        assert_eq!(window_end(NaiveDate::MAX, 10), NaiveDate::MAX);
    }
}
