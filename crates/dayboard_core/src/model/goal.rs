//! Goal and milestone records.
//!
//! # Invariants
//! - `target` is strictly positive.
//! - `current` stays within `0..=target`; writers clamp instead of failing.

use super::{new_record_id, require_text, RecordId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Checkpoint inside a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: RecordId,
    pub description: String,
    pub completed: bool,
}

impl Milestone {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            description: description.into(),
            completed: false,
        }
    }
}

/// Measurable goal with a numeric target and a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub target: f64,
    #[serde(default)]
    pub current: f64,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Editable goal fields, shared by create and edit flows.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub target: f64,
    pub current: f64,
    pub deadline: NaiveDate,
}

impl Goal {
    /// Builds a goal from a draft with a fresh id and no milestones.
    ///
    /// `current` is clamped into `0..=target`.
    pub fn from_draft(draft: GoalDraft) -> Self {
        let mut goal = Self {
            id: new_record_id(),
            title: draft.title,
            description: draft.description,
            category: draft.category,
            target: draft.target,
            current: draft.current,
            deadline: draft.deadline,
            milestones: Vec::new(),
        };
        goal.set_progress(goal.current);
        goal
    }

    /// Replaces editable fields, keeping id and milestones.
    pub fn apply_draft(&mut self, draft: GoalDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.category = draft.category;
        self.target = draft.target;
        self.deadline = draft.deadline;
        self.set_progress(draft.current);
    }

    /// Sets progress, clamped into `0..=target`.
    pub fn set_progress(&mut self, value: f64) {
        let upper = self.target.max(0.0);
        self.current = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, upper)
        };
    }

    /// Progress as a percentage of `target`.
    pub fn progress_percent(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        self.current / self.target * 100.0
    }

    pub fn completed_milestones(&self) -> usize {
        self.milestones.iter().filter(|m| m.completed).count()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        if self.target <= 0.0 || !self.target.is_finite() {
            return Err(ValidationError::NonPositiveTarget(self.target));
        }
        if !(0.0..=self.target).contains(&self.current) {
            return Err(ValidationError::OutOfRange {
                field: "current",
                value: self.current,
                min: 0.0,
                max: self.target,
            });
        }
        for milestone in &self.milestones {
            require_text("milestone.description", &milestone.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Goal, GoalDraft};
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn draft(target: f64, current: f64) -> GoalDraft {
        GoalDraft {
            title: "Read books".to_string(),
            description: String::new(),
            category: "learning".to_string(),
            target,
            current,
            deadline: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
    }

    #[test]
    fn zero_target_is_rejected() {
        let goal = Goal::from_draft(draft(0.0, 0.0));
        assert_eq!(goal.validate(), Err(ValidationError::NonPositiveTarget(0.0)));
    }

    #[test]
    fn progress_is_clamped_to_target() {
        let mut goal = Goal::from_draft(draft(12.0, 20.0));
        assert_eq!(goal.current, 12.0);
        goal.set_progress(-3.0);
        assert_eq!(goal.current, 0.0);
        goal.set_progress(3.0);
        assert_eq!(goal.progress_percent(), 25.0);
    }

    #[test]
    fn serializes_with_camel_case_and_iso_deadline() {
        let goal = Goal::from_draft(draft(10.0, 1.0));
        let json = serde_json::to_value(&goal).unwrap();
        assert_eq!(json["deadline"], "2024-12-31");
        assert!(json.get("milestones").unwrap().as_array().unwrap().is_empty());
    }
}
