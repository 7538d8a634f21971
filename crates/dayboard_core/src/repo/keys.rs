//! Store key names.
//!
//! These names are part of the export file format; renaming one breaks
//! imports of previously exported files.

use chrono::NaiveDate;

pub const GOALS: &str = "goals";
pub const HABITS: &str = "habits";
pub const SKILLS: &str = "skills";
pub const REFLECTIONS: &str = "reflections";
pub const NOTIFICATION_SETTINGS: &str = "notificationSettings";
pub const TASKS: &str = "tasks";
pub const REMINDERS: &str = "reminders";

pub const WEEKLY_REVIEW_PREFIX: &str = "weekly-review-";
pub const WEEKLY_PLAN_PREFIX: &str = "weekly-plan-";

/// Collection keys in export order.
pub const COLLECTION_KEYS: [&str; 7] = [
    GOALS,
    HABITS,
    SKILLS,
    REFLECTIONS,
    NOTIFICATION_SETTINGS,
    TASKS,
    REMINDERS,
];

pub fn weekly_review_key(week_starting: NaiveDate) -> String {
    format!("{WEEKLY_REVIEW_PREFIX}{}", week_starting.format("%Y-%m-%d"))
}

pub fn weekly_plan_key(week_starting: NaiveDate) -> String {
    format!("{WEEKLY_PLAN_PREFIX}{}", week_starting.format("%Y-%m-%d"))
}

pub fn is_weekly_key(key: &str) -> bool {
    key.starts_with(WEEKLY_REVIEW_PREFIX) || key.starts_with(WEEKLY_PLAN_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::{is_weekly_key, weekly_plan_key, weekly_review_key};
    use chrono::NaiveDate;

    #[test]
    fn weekly_keys_embed_iso_date() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        assert_eq!(weekly_review_key(monday), "weekly-review-2024-01-08");
        assert_eq!(weekly_plan_key(monday), "weekly-plan-2024-01-08");
        assert!(is_weekly_key("weekly-plan-2024-01-08"));
        assert!(!is_weekly_key("goals"));
    }
}
