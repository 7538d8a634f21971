//! Skill development tracking.

use super::{new_record_id, require_text, RecordId, ValidationError};
use serde::{Deserialize, Serialize};

pub const MAX_PROGRESS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub current_level: u32,
    pub target_level: u32,
    #[serde(default)]
    pub progress: f64,
}

/// Editable skill fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDraft {
    pub name: String,
    pub category: String,
    pub current_level: u32,
    pub target_level: u32,
}

impl Default for SkillDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            current_level: 1,
            target_level: 10,
        }
    }
}

impl Skill {
    pub fn from_draft(draft: SkillDraft) -> Self {
        Self {
            id: new_record_id(),
            name: draft.name,
            category: draft.category,
            current_level: draft.current_level,
            target_level: draft.target_level,
            progress: 0.0,
        }
    }

    pub fn apply_draft(&mut self, draft: SkillDraft) {
        self.name = draft.name;
        self.category = draft.category;
        self.current_level = draft.current_level;
        self.target_level = draft.target_level;
    }

    /// Sets progress percentage, clamped into `0..=100`.
    pub fn set_progress(&mut self, value: f64) {
        self.progress = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, MAX_PROGRESS)
        };
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        for (field, level) in [
            ("currentLevel", self.current_level),
            ("targetLevel", self.target_level),
        ] {
            if level == 0 {
                return Err(ValidationError::OutOfRange {
                    field,
                    value: f64::from(level),
                    min: 1.0,
                    max: f64::from(u32::MAX),
                });
            }
        }
        if !(0.0..=MAX_PROGRESS).contains(&self.progress) {
            return Err(ValidationError::OutOfRange {
                field: "progress",
                value: self.progress,
                min: 0.0,
                max: MAX_PROGRESS,
            });
        }
        Ok(())
    }
}
