//! Engine settings and generation filters

use crate::domain::{Gender, VaccineDefinition};
use serde::{Deserialize, Serialize};

/// Default recurrence horizon for annual doses: 18 years
pub const DEFAULT_HORIZON_DAYS: u32 = 18 * 365;
/// Default upcoming window
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 60;
/// Default reminder lead time (one month)
pub const DEFAULT_NOTIFICATION_LEAD_DAYS: u32 = 30;
/// Default tolerance before a future completion date is reported
pub const DEFAULT_FUTURE_COMPLETION_TOLERANCE_DAYS: u32 = 7;
/// Spacing between occurrences of an annual dose
pub const DAYS_PER_OCCURRENCE: i64 = 365;

/// Numeric knobs of the schedule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Annual doses recur while their offset from birth stays within this
    pub horizon_days: u32,

    /// Entries due within this many days after "now" are upcoming
    pub upcoming_window_days: u32,

    /// Reminder lead time before the due date
    pub notification_lead_days: u32,

    /// Completion dates further than this past "now" are flagged
    pub future_completion_tolerance_days: u32,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            notification_lead_days: DEFAULT_NOTIFICATION_LEAD_DAYS,
            future_completion_tolerance_days: DEFAULT_FUTURE_COMPLETION_TOLERANCE_DAYS,
        }
    }
}

impl ScheduleSettings {
    /// Sets the annual recurrence horizon
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// Sets the upcoming window
    pub fn with_upcoming_window_days(mut self, days: u32) -> Self {
        self.upcoming_window_days = days;
        self
    }

    /// Sets the reminder lead time
    pub fn with_notification_lead_days(mut self, days: u32) -> Self {
        self.notification_lead_days = days;
        self
    }
}

/// Which catalog definitions apply to a particular child
///
/// The default admits every definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationFilter {
    /// Keep non-mandatory doses
    pub include_optional: bool,

    /// Child's gender; gender-restricted doses for the other gender are skipped
    pub gender: Option<Gender>,
}

impl Default for GenerationFilter {
    fn default() -> Self {
        Self {
            include_optional: true,
            gender: None,
        }
    }
}

impl GenerationFilter {
    /// Whether a definition produces entries under this filter
    pub fn admits(&self, definition: &VaccineDefinition) -> bool {
        (self.include_optional || definition.is_mandatory) && definition.applies_to(self.gender)
    }
}
