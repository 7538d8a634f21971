//! Task filter/sort pipeline and Eisenhower grouping.
//!
//! # Invariants
//! - Filtering never reorders; sorting is stable, so ties keep stored order.
//! - `TaskSort::Manual` returns tasks in stored (drag-and-drop) order.

use crate::model::task::{Priority, Quadrant, Task, TaskStatus};
use std::cmp::Ordering;
use std::str::FromStr;

/// Which tasks survive the filter step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Priority(Priority),
    Tag(String),
    Quadrant(Quadrant),
}

impl FromStr for TaskFilter {
    type Err = String;

    /// Accepts `all`, `high|medium|low`, `tag:<name>` or a quadrant name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if let Some(tag) = trimmed.strip_prefix("tag:") {
            return Ok(Self::Tag(tag.to_string()));
        }
        if let Ok(priority) = trimmed.parse::<Priority>() {
            return Ok(Self::Priority(priority));
        }
        trimmed
            .parse::<Quadrant>()
            .map(Self::Quadrant)
            .map_err(|_| {
                format!("unknown filter `{trimmed}`; expected all|high|medium|low|tag:<name>|<quadrant>")
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    /// Earliest due date first.
    #[default]
    DueDate,
    /// High, then medium, then low.
    Priority,
    /// Longest estimate first.
    EstimatedTime,
    Manual,
}

impl FromStr for TaskSort {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "due" | "duedate" | "due-date" => Ok(Self::DueDate),
            "priority" => Ok(Self::Priority),
            "estimate" | "estimatedtime" | "estimated-time" => Ok(Self::EstimatedTime),
            "manual" | "none" => Ok(Self::Manual),
            other => Err(format!(
                "unknown sort `{other}`; expected due|priority|estimate|manual"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub show_completed: bool,
    /// Case-insensitive title substring. Blank matches everything.
    pub search: Option<String>,
    pub filter: TaskFilter,
    pub sort: TaskSort,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            show_completed: true,
            search: None,
            filter: TaskFilter::All,
            sort: TaskSort::DueDate,
        }
    }
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        if !self.show_completed && task.status == TaskStatus::Done {
            return false;
        }
        if let Some(search) = self.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !task.title.to_lowercase().contains(&needle) {
                return false;
            }
        }
        match &self.filter {
            TaskFilter::All => true,
            TaskFilter::Priority(priority) => task.priority == *priority,
            TaskFilter::Tag(tag) => task.tags.iter().any(|t| t == tag),
            TaskFilter::Quadrant(quadrant) => task.category == *quadrant,
        }
    }

    /// Filters then stably sorts `tasks`.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut selected: Vec<&Task> = tasks.iter().filter(|task| self.matches(task)).collect();
        selected.sort_by(|a, b| compare(self.sort, a, b));
        selected
    }
}

fn compare(sort: TaskSort, a: &Task, b: &Task) -> Ordering {
    match sort {
        TaskSort::DueDate => a.due_date.cmp(&b.due_date),
        TaskSort::Priority => b.priority.weight().cmp(&a.priority.weight()),
        TaskSort::EstimatedTime => b.estimated_time.cmp(&a.estimated_time),
        TaskSort::Manual => Ordering::Equal,
    }
}

/// Groups tasks into the four quadrants in matrix order. Empty quadrants are
/// kept so callers can render a full 2x2 grid.
pub fn eisenhower_matrix(tasks: &[Task]) -> Vec<(Quadrant, Vec<&Task>)> {
    Quadrant::ALL
        .into_iter()
        .map(|quadrant| {
            let members = tasks
                .iter()
                .filter(|task| task.category == quadrant)
                .collect();
            (quadrant, members)
        })
        .collect()
}

/// Distinct tags across tasks in first-seen order.
pub fn all_tags(tasks: &[Task]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in tasks.iter().flat_map(|task| task.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::{all_tags, eisenhower_matrix, TaskFilter, TaskQuery, TaskSort};
    use crate::model::task::{Priority, Quadrant, Task, TaskStatus};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn task(title: &str, due: u32, priority: Priority, estimate: u32) -> Task {
        let mut task = Task::new(title, day(due));
        task.priority = priority;
        task.estimated_time = estimate;
        task
    }

    fn sample() -> Vec<Task> {
        let mut write = task("Write draft", 5, Priority::Low, 60);
        write.set_tags(["writing", "work"]);
        let mut review = task("Review PR", 2, Priority::High, 15);
        review.set_tags(["work"]);
        review.category = Quadrant::NotImportantUrgent;
        let mut gym = task("Gym", 3, Priority::Medium, 45);
        gym.status = TaskStatus::Done;
        let email = task("Email reply", 2, Priority::High, 5);
        vec![write, review, gym, email]
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|task| task.title.clone()).collect()
    }

    #[test]
    fn due_date_sort_is_stable_for_ties() {
        let tasks = sample();
        let result = TaskQuery::default().apply(&tasks);
        assert_eq!(
            titles(&result),
            vec!["Review PR", "Email reply", "Gym", "Write draft"]
        );
    }

    #[test]
    fn priority_and_estimate_sorts_are_descending() {
        let tasks = sample();
        let by_priority = TaskQuery {
            sort: TaskSort::Priority,
            ..TaskQuery::default()
        };
        assert_eq!(
            titles(&by_priority.apply(&tasks)),
            vec!["Review PR", "Email reply", "Gym", "Write draft"]
        );

        let by_estimate = TaskQuery {
            sort: TaskSort::EstimatedTime,
            ..TaskQuery::default()
        };
        assert_eq!(
            titles(&by_estimate.apply(&tasks)),
            vec!["Write draft", "Gym", "Review PR", "Email reply"]
        );
    }

    #[test]
    fn hides_done_and_searches_titles() {
        let tasks = sample();
        let query = TaskQuery {
            show_completed: false,
            search: Some("RE".to_string()),
            sort: TaskSort::Manual,
            ..TaskQuery::default()
        };
        assert_eq!(titles(&query.apply(&tasks)), vec!["Review PR", "Email reply"]);
    }

    #[test]
    fn filters_by_tag_priority_and_quadrant() {
        let tasks = sample();
        let by_tag = TaskQuery {
            filter: "tag:work".parse().unwrap(),
            sort: TaskSort::Manual,
            ..TaskQuery::default()
        };
        assert_eq!(titles(&by_tag.apply(&tasks)), vec!["Write draft", "Review PR"]);

        let by_priority = TaskQuery {
            filter: TaskFilter::Priority(Priority::High),
            sort: TaskSort::Manual,
            ..TaskQuery::default()
        };
        assert_eq!(by_priority.apply(&tasks).len(), 2);

        let by_quadrant = TaskQuery {
            filter: "Not Important & Urgent".parse().unwrap(),
            ..TaskQuery::default()
        };
        assert_eq!(titles(&by_quadrant.apply(&tasks)), vec!["Review PR"]);
    }

    #[test]
    fn filter_parsing_rejects_unknown_values() {
        assert_eq!("ALL".parse::<TaskFilter>().unwrap(), TaskFilter::All);
        assert_eq!(
            "high".parse::<TaskFilter>().unwrap(),
            TaskFilter::Priority(Priority::High)
        );
        assert!("someday".parse::<TaskFilter>().is_err());
    }

    #[test]
    fn matrix_keeps_all_quadrants_in_order() {
        let tasks = sample();
        let matrix = eisenhower_matrix(&tasks);
        assert_eq!(matrix.len(), 4);
        assert_eq!(matrix[0].0, Quadrant::ImportantUrgent);
        assert_eq!(matrix[0].1.len(), 3);
        assert_eq!(matrix[2].1.len(), 1);
        assert!(matrix[3].1.is_empty());
    }

    #[test]
    fn all_tags_keeps_first_seen_order() {
        assert_eq!(all_tags(&sample()), vec!["writing", "work"]);
    }
}
