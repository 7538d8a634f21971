//! To-do list use-case service.
//!
//! # Responsibility
//! - CRUD over the stored task list, preserving manual order.
//! - Quadrant moves, completion toggles and focus-session time logging.
//! - Query entry points over the filter/sort pipeline.

use super::task_query::{all_tags, eisenhower_matrix, TaskQuery};
use super::{find_mut, position_of, ServiceError, ServiceResult};
use crate::model::task::{Quadrant, Task, FOCUS_SESSION_SECONDS};
use crate::repo::{
    load_collection, load_collection_for_update, save_collection, KeyValueStore,
};
use log::info;

pub struct TaskService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All tasks in stored order.
    pub fn list_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(load_collection(&self.store)?)
    }

    pub fn get_task(&self, id: &str) -> ServiceResult<Task> {
        let tasks = self.list_tasks()?;
        let index = position_of(&tasks, id)?;
        Ok(tasks[index].clone())
    }

    /// Filtered and sorted view; returns owned records.
    pub fn query_tasks(&self, query: &TaskQuery) -> ServiceResult<Vec<Task>> {
        let tasks = self.list_tasks()?;
        Ok(query.apply(&tasks).into_iter().cloned().collect())
    }

    /// Appends a task. The caller builds it with `Task::new` and adjusts
    /// fields; a fresh id is kept as given.
    pub fn add_task(&self, task: Task) -> ServiceResult<Task> {
        task.validate()?;
        let mut tasks: Vec<Task> = load_collection_for_update(&self.store)?;
        tasks.push(task.clone());
        save_collection(&self.store, &tasks)?;
        info!(
            "event=task_add module=service status=ok id={} total={}",
            task.id,
            tasks.len()
        );
        Ok(task)
    }

    /// Replaces the stored task with the same id.
    pub fn update_task(&self, task: Task) -> ServiceResult<Task> {
        task.validate()?;
        let mut tasks: Vec<Task> = load_collection_for_update(&self.store)?;
        let slot = find_mut(&mut tasks, &task.id)?;
        *slot = task.clone();
        save_collection(&self.store, &tasks)?;
        Ok(task)
    }

    pub fn delete_task(&self, id: &str) -> ServiceResult<()> {
        let mut tasks: Vec<Task> = load_collection_for_update(&self.store)?;
        let index = position_of(&tasks, id)?;
        tasks.remove(index);
        save_collection(&self.store, &tasks)?;
        info!("event=task_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Moves the task at `from` to position `to` (drag and drop).
    pub fn reorder_task(&self, from: usize, to: usize) -> ServiceResult<()> {
        let mut tasks: Vec<Task> = load_collection_for_update(&self.store)?;
        let len = tasks.len();
        for index in [from, to] {
            if index >= len {
                return Err(ServiceError::InvalidIndex { index, len });
            }
        }
        let task = tasks.remove(from);
        tasks.insert(to, task);
        save_collection(&self.store, &tasks)?;
        Ok(())
    }

    pub fn set_completed(&self, id: &str, completed: bool) -> ServiceResult<Task> {
        self.modify(id, |task| task.set_completed(completed))
    }

    pub fn move_to_quadrant(&self, id: &str, quadrant: Quadrant) -> ServiceResult<Task> {
        self.modify(id, |task| task.category = quadrant)
    }

    /// Adds one focus session (25 minutes) to the task's time spent.
    pub fn log_focus_session(&self, id: &str) -> ServiceResult<Task> {
        let task = self.modify(id, |task| {
            task.time_spent = task.time_spent.saturating_add(FOCUS_SESSION_SECONDS);
        })?;
        info!(
            "event=task_focus module=service status=ok id={} time_spent_s={}",
            task.id, task.time_spent
        );
        Ok(task)
    }

    pub fn matrix(&self) -> ServiceResult<Vec<(Quadrant, Vec<Task>)>> {
        let tasks = self.list_tasks()?;
        Ok(eisenhower_matrix(&tasks)
            .into_iter()
            .map(|(quadrant, members)| (quadrant, members.into_iter().cloned().collect()))
            .collect())
    }

    pub fn tags(&self) -> ServiceResult<Vec<String>> {
        let tasks = self.list_tasks()?;
        Ok(all_tags(&tasks))
    }

    fn modify(&self, id: &str, change: impl FnOnce(&mut Task)) -> ServiceResult<Task> {
        let mut tasks: Vec<Task> = load_collection_for_update(&self.store)?;
        let task = find_mut(&mut tasks, id)?;
        change(task);
        task.validate()?;
        let updated = task.clone();
        save_collection(&self.store, &tasks)?;
        Ok(updated)
    }
}
