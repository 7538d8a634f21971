//! Weekly review and weekly plan documents.
//!
//! Both documents are keyed by the Monday that starts their week. Stored
//! `weekStarting` values are kept as written, even when an older writer
//! picked a different weekday.

use super::ValidationError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

const PLAN_GOAL_SLOTS: usize = 3;
const PLAN_TASK_SLOTS: usize = 5;
const PLAN_FOCUS_SLOTS: usize = 3;

/// Returns the Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReview {
    pub week_starting: NaiveDate,
    #[serde(default)]
    pub accomplishments: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub lessons_learned: String,
    #[serde(default)]
    pub gratitude: String,
}

impl WeeklyReview {
    /// Empty review for the week containing `date`.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            week_starting: week_start(date),
            accomplishments: String::new(),
            challenges: String::new(),
            lessons_learned: String::new(),
            gratitude: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanGoal {
    pub text: String,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub week_starting: NaiveDate,
    #[serde(default)]
    pub top_goals: Vec<PlanGoal>,
    #[serde(default)]
    pub key_tasks: Vec<String>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub personal_development: String,
}

impl WeeklyPlan {
    /// Empty plan for the week containing `date`, with the form's fixed slot
    /// counts: 3 goals, 5 key tasks, 3 focus areas.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            week_starting: week_start(date),
            top_goals: vec![
                PlanGoal {
                    text: String::new(),
                    progress: 0.0,
                };
                PLAN_GOAL_SLOTS
            ],
            key_tasks: vec![String::new(); PLAN_TASK_SLOTS],
            focus_areas: vec![String::new(); PLAN_FOCUS_SLOTS],
            personal_development: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for goal in &self.top_goals {
            if !(0.0..=100.0).contains(&goal.progress) {
                return Err(ValidationError::OutOfRange {
                    field: "topGoals.progress",
                    value: goal.progress,
                    min: 0.0,
                    max: 100.0,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{week_start, WeeklyPlan, WeeklyReview};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_is_monday() {
        // 2024-06-02 is a Sunday; its week starts on 2024-05-27.
        assert_eq!(week_start(day(2024, 6, 2)), day(2024, 5, 27));
        assert_eq!(week_start(day(2024, 6, 3)), day(2024, 6, 3));
        assert_eq!(week_start(day(2024, 6, 5)), day(2024, 6, 3));
    }

    #[test]
    fn blank_plan_has_form_slots() {
        let plan = WeeklyPlan::blank(day(2024, 6, 5));
        assert_eq!(plan.top_goals.len(), 3);
        assert_eq!(plan.key_tasks.len(), 5);
        assert_eq!(plan.focus_areas.len(), 3);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn blank_review_is_keyed_by_monday() {
        let review = WeeklyReview::blank(day(2024, 6, 9));
        assert_eq!(review.week_starting, day(2024, 6, 3));
        assert!(review.accomplishments.is_empty());
    }
}
