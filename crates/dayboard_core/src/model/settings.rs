//! Notification preferences and reminders.
//!
//! # Invariants
//! - Notification settings are keyed by `type`; toggling an unknown type is a
//!   no-op at the model level.
//! - Reminder `time` is a 24h `HH:MM` value and `days` are lowercase weekday
//!   names without repeats.

use super::{new_record_id, RecordId, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

static CLOCK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid clock regex"));

pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSetting {
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
}

impl NotificationSetting {
    pub fn new(kind: impl Into<String>, enabled: bool) -> Self {
        Self {
            kind: kind.into(),
            enabled,
        }
    }
}

/// Settings used when nothing has been stored yet.
pub fn default_notification_settings() -> Vec<NotificationSetting> {
    vec![
        NotificationSetting::new("Goal Reminders", true),
        NotificationSetting::new("Habit Tracking", true),
        NotificationSetting::new("Daily Reflection", false),
        NotificationSetting::new("Weekly Summary", true),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Daily,
    Weekly,
    Monthly,
    Task,
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "task" => Ok(Self::Task),
            other => Err(format!(
                "unknown reminder type `{other}`; expected daily|weekly|monthly|task"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub time: String,
    #[serde(default)]
    pub days: Vec<String>,
    pub enabled: bool,
}

impl Reminder {
    /// Creates an enabled reminder. Day names are lowercased.
    pub fn new<I, S>(kind: ReminderKind, time: impl Into<String>, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: new_record_id(),
            kind,
            time: time.into(),
            days: days
                .into_iter()
                .map(|day| day.as_ref().trim().to_ascii_lowercase())
                .collect(),
            enabled: true,
        }
    }

    /// Weekday-only defaults offered by the reminder form.
    pub fn workdays() -> Vec<String> {
        WEEKDAYS[..5].iter().map(|day| (*day).to_string()).collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !CLOCK_TIME_RE.is_match(&self.time) {
            return Err(ValidationError::InvalidTime(self.time.clone()));
        }
        for (index, day) in self.days.iter().enumerate() {
            if !WEEKDAYS.contains(&day.as_str()) {
                return Err(ValidationError::UnknownValue {
                    field: "days",
                    value: day.clone(),
                });
            }
            if self.days[..index].contains(day) {
                return Err(ValidationError::Duplicate {
                    field: "days",
                    value: day.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{default_notification_settings, Reminder, ReminderKind};
    use crate::model::ValidationError;

    #[test]
    fn defaults_keep_daily_reflection_off() {
        let defaults = default_notification_settings();
        assert_eq!(defaults.len(), 4);
        let reflection = defaults
            .iter()
            .find(|setting| setting.kind == "Daily Reflection")
            .unwrap();
        assert!(!reflection.enabled);
    }

    #[test]
    fn reminder_time_must_be_clock_value() {
        let ok = Reminder::new(ReminderKind::Daily, "09:00", Reminder::workdays());
        assert!(ok.validate().is_ok());

        let bad = Reminder::new(ReminderKind::Daily, "9am", ["Monday"]);
        assert_eq!(
            bad.validate(),
            Err(ValidationError::InvalidTime("9am".to_string()))
        );
    }

    #[test]
    fn reminder_rejects_repeated_days() {
        let reminder = Reminder::new(ReminderKind::Weekly, "18:30", ["Friday", "friday"]);
        assert!(matches!(
            reminder.validate(),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn notification_setting_serializes_type_field() {
        let json = serde_json::to_string(&default_notification_settings()[0]).unwrap();
        assert_eq!(json, r#"{"type":"Goal Reminders","enabled":true}"#);
    }
}
