//! Dashboard summary derived from stored collections.

use super::ServiceResult;
use crate::model::goal::Goal;
use crate::model::habit::{calculate_streak, Habit};
use crate::model::reflection::ReflectionEntry;
use crate::model::task::{Task, TaskStatus};
use crate::repo::{load_collection, KeyValueStore};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub goals_total: usize,
    /// Mean of per-goal progress percentages; 0 when there are no goals.
    pub goals_average_percent: f64,
    pub habits_total: usize,
    /// Highest streak as of the summary date, not the stored value.
    pub best_streak: u32,
    pub tasks_total: usize,
    pub tasks_done: usize,
    pub tasks_overdue: usize,
    pub reflections_total: usize,
}

impl DashboardSummary {
    pub fn task_completion_percent(&self) -> f64 {
        if self.tasks_total == 0 {
            return 0.0;
        }
        self.tasks_done as f64 / self.tasks_total as f64 * 100.0
    }
}

pub struct SummaryService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SummaryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn summary(&self, today: NaiveDate) -> ServiceResult<DashboardSummary> {
        let goals: Vec<Goal> = load_collection(&self.store)?;
        let habits: Vec<Habit> = load_collection(&self.store)?;
        let tasks: Vec<Task> = load_collection(&self.store)?;
        let reflections: Vec<ReflectionEntry> = load_collection(&self.store)?;

        let goals_average_percent = if goals.is_empty() {
            0.0
        } else {
            goals.iter().map(Goal::progress_percent).sum::<f64>() / goals.len() as f64
        };

        Ok(DashboardSummary {
            goals_total: goals.len(),
            goals_average_percent,
            habits_total: habits.len(),
            best_streak: habits
                .iter()
                .map(|habit| {
                    calculate_streak(
                        &habit.completed_dates,
                        habit.frequency,
                        habit.tracking_period,
                        today,
                    )
                })
                .max()
                .unwrap_or(0),
            tasks_total: tasks.len(),
            tasks_done: tasks
                .iter()
                .filter(|task| task.status == TaskStatus::Done)
                .count(),
            tasks_overdue: tasks.iter().filter(|task| task.is_overdue(today)).count(),
            reflections_total: reflections.len(),
        })
    }
}
