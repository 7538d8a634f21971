//! Core domain logic for Dayboard.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transfer;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{Goal, GoalDraft, Milestone};
pub use model::habit::{calculate_streak, tracking_window, Habit, HabitDraft, TrackingPeriod};
pub use model::reflection::ReflectionEntry;
pub use model::settings::{NotificationSetting, Reminder, ReminderKind};
pub use model::skill::{Skill, SkillDraft};
pub use model::task::{Priority, Quadrant, Task, TaskStatus};
pub use model::weekly::{week_start, PlanGoal, WeeklyPlan, WeeklyReview};
pub use model::{RecordId, ValidationError};
pub use repo::{KeyValueStore, RepoError, RepoResult, SqliteKeyValueStore};
pub use service::goal_service::GoalService;
pub use service::habit_service::{HabitDay, HabitService};
pub use service::reflection_service::{NewReflection, ReflectionService};
pub use service::settings_service::SettingsService;
pub use service::skill_service::SkillService;
pub use service::summary_service::{DashboardSummary, SummaryService};
pub use service::task_query::{TaskFilter, TaskQuery, TaskSort};
pub use service::task_service::TaskService;
pub use service::weekly_service::WeeklyService;
pub use service::{ServiceError, ServiceResult};
pub use transfer::{export_bundle, import_bundle, ImportReport, TransferError, EXPORT_FILE_NAME};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
