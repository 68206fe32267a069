//! User-facing reminder settings.
//!
//! Time-of-day strings are validated by the editing surface, not here; the
//! engine degrades to midnight on garbage input rather than re-validating.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub notifications: NotificationSettings,
    /// Absent on the simpler app revision: no recurring-date reminders at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_reminders: Option<DateReminderSettings>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notifications: NotificationSettings::default(),
            date_reminders: Some(DateReminderSettings::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Master switch; off means the engine emits nothing.
    pub enabled: bool,
    /// "HH:MM" local time for daily/weekly/day-of reminders.
    pub preferred_time: String,
    /// Carried in the data model but not consulted by the scheduling paths;
    /// only quiet days are enforced. Kept as observed, flagged in DESIGN.md.
    pub quiet_hours_start: String,
    pub quiet_hours_end: String,
    /// Weekday indices, 0 = Sunday .. 6 = Saturday.
    #[serde(default)]
    pub quiet_days: Vec<u8>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            preferred_time: "09:00".to_string(),
            quiet_hours_start: "22:00".to_string(),
            quiet_hours_end: "08:00".to_string(),
            quiet_days: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateReminderSettings {
    pub early_warning_enabled: bool,
    /// Days of advance notice; always >= 1 once past the editing surface.
    pub early_warning_days: i64,
    pub on_the_day_enabled: bool,
}

impl Default for DateReminderSettings {
    fn default() -> Self {
        Self {
            early_warning_enabled: true,
            early_warning_days: 7,
            on_the_day_enabled: true,
        }
    }
}
