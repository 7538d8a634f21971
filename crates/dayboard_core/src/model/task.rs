//! To-do task record and its Eisenhower classification.
//!
//! # Invariants
//! - `title` is never blank.
//! - `category` always names one of the four Eisenhower quadrants.
//! - `time_spent` is tracked in seconds, `estimated_time` in minutes.

use super::{
    deserialize_calendar_date, new_record_id, normalize_tags, require_text, RecordId,
    ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Default estimate for newly added tasks, in minutes.
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 30;
/// Length of one focus (pomodoro) session, in seconds.
pub const FOCUS_SESSION_SECONDS: u64 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort weight; higher sorts first in priority order.
    pub fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority `{other}`; expected low|medium|high")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "todo" => Ok(Self::Todo),
            "in progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(format!(
                "unknown status `{other}`; expected todo|in-progress|done"
            )),
        }
    }
}

/// Eisenhower matrix quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "Important & Urgent")]
    ImportantUrgent,
    #[serde(rename = "Important & Not Urgent")]
    ImportantNotUrgent,
    #[serde(rename = "Not Important & Urgent")]
    NotImportantUrgent,
    #[serde(rename = "Not Important & Not Urgent")]
    NotImportantNotUrgent,
}

impl Quadrant {
    /// Display order of the matrix: do, schedule, delegate, drop.
    pub const ALL: [Quadrant; 4] = [
        Self::ImportantUrgent,
        Self::ImportantNotUrgent,
        Self::NotImportantUrgent,
        Self::NotImportantNotUrgent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ImportantUrgent => "Important & Urgent",
            Self::ImportantNotUrgent => "Important & Not Urgent",
            Self::NotImportantUrgent => "Not Important & Urgent",
            Self::NotImportantNotUrgent => "Not Important & Not Urgent",
        }
    }
}

impl Display for Quadrant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quadrant {
    type Err = String;

    /// Accepts the full label (case-insensitive) or the short codes
    /// `iu`, `in`, `nu`, `nn`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "iu" => return Ok(Self::ImportantUrgent),
            "in" => return Ok(Self::ImportantNotUrgent),
            "nu" => return Ok(Self::NotImportantUrgent),
            "nn" => return Ok(Self::NotImportantNotUrgent),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|quadrant| quadrant.label().to_ascii_lowercase() == normalized)
            .ok_or_else(|| format!("unknown quadrant `{value}`; expected iu|in|nu|nn"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub priority: Priority,
    #[serde(deserialize_with = "deserialize_calendar_date")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub time_spent: u64,
    pub category: Quadrant,
    #[serde(default = "default_estimated_minutes")]
    pub estimated_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<String>,
}

fn default_estimated_minutes() -> u32 {
    DEFAULT_ESTIMATED_MINUTES
}

impl Task {
    /// Creates a task with quick-add defaults: medium priority, todo status,
    /// due `today`, 30 minute estimate, important & urgent quadrant.
    pub fn new(title: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            description: String::new(),
            completed: false,
            priority: Priority::Medium,
            due_date: today,
            tags: Vec::new(),
            status: TaskStatus::Todo,
            time_spent: 0,
            category: Quadrant::ImportantUrgent,
            estimated_time: DEFAULT_ESTIMATED_MINUTES,
            assigned_to: None,
            collaborator: None,
        }
    }

    pub fn set_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = normalize_tags(tags);
    }

    /// Sets the completion flag and keeps `status` in step with it.
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        if completed {
            self.status = TaskStatus::Done;
        } else if self.status == TaskStatus::Done {
            self.status = TaskStatus::Todo;
        }
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.due_date < today
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        for tag in &self.tags {
            require_text("tags", tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Quadrant, Task, TaskStatus};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn new_task_uses_quick_add_defaults() {
        let task = Task::new("Write report", today());
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.category, Quadrant::ImportantUrgent);
        assert_eq!(task.estimated_time, 30);
        assert_eq!(task.due_date, today());
    }

    #[test]
    fn serializes_labels_used_by_stored_data() {
        let mut task = Task::new("Plan", today());
        task.status = TaskStatus::InProgress;
        task.category = Quadrant::NotImportantNotUrgent;
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["category"], "Not Important & Not Urgent");
        assert_eq!(json["dueDate"], "2024-06-01");
        assert!(json.get("assignedTo").is_none());
    }

    #[test]
    fn quadrant_parses_labels_and_codes() {
        assert_eq!(
            "important & not urgent".parse::<Quadrant>().unwrap(),
            Quadrant::ImportantNotUrgent
        );
        assert_eq!("nu".parse::<Quadrant>().unwrap(), Quadrant::NotImportantUrgent);
        assert!("later".parse::<Quadrant>().is_err());
    }

    #[test]
    fn completion_flag_drives_status() {
        let mut task = Task::new("Ship", today());
        task.set_completed(true);
        assert_eq!(task.status, TaskStatus::Done);
        task.set_completed(false);
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn overdue_ignores_done_tasks() {
        let mut task = Task::new("Late", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(task.is_overdue(today()));
        task.set_completed(true);
        assert!(!task.is_overdue(today()));
    }
}
