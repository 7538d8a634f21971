//! Goal use-case service.
//!
//! # Invariants
//! - Goals are rejected unless title is non-blank and target is positive.
//! - Progress updates clamp into `0..=target` rather than failing.

use super::{find_mut, position_of, ServiceError, ServiceResult};
use crate::model::goal::{Goal, GoalDraft, Milestone};
use crate::model::require_text;
use crate::repo::{
    load_collection, load_collection_for_update, save_collection, KeyValueStore,
};
use log::info;

pub struct GoalService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> GoalService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list_goals(&self) -> ServiceResult<Vec<Goal>> {
        Ok(load_collection(&self.store)?)
    }

    pub fn get_goal(&self, id: &str) -> ServiceResult<Goal> {
        let goals = self.list_goals()?;
        let index = position_of(&goals, id)?;
        Ok(goals[index].clone())
    }

    /// Adds a goal built from `draft`; returns the stored record.
    pub fn add_goal(&self, draft: GoalDraft) -> ServiceResult<Goal> {
        let goal = Goal::from_draft(draft);
        goal.validate()?;

        let mut goals: Vec<Goal> = load_collection_for_update(&self.store)?;
        goals.push(goal.clone());
        save_collection(&self.store, &goals)?;
        info!(
            "event=goal_add module=service status=ok id={} total={}",
            goal.id,
            goals.len()
        );
        Ok(goal)
    }

    /// Replaces editable fields of an existing goal.
    pub fn edit_goal(&self, id: &str, draft: GoalDraft) -> ServiceResult<Goal> {
        let mut goals: Vec<Goal> = load_collection_for_update(&self.store)?;
        let goal = find_mut(&mut goals, id)?;
        goal.apply_draft(draft);
        goal.validate()?;
        let updated = goal.clone();
        save_collection(&self.store, &goals)?;
        Ok(updated)
    }

    pub fn update_progress(&self, id: &str, value: f64) -> ServiceResult<Goal> {
        let mut goals: Vec<Goal> = load_collection_for_update(&self.store)?;
        let goal = find_mut(&mut goals, id)?;
        goal.set_progress(value);
        let updated = goal.clone();
        save_collection(&self.store, &goals)?;
        info!(
            "event=goal_progress module=service status=ok id={} percent={:.1}",
            updated.id,
            updated.progress_percent()
        );
        Ok(updated)
    }

    pub fn delete_goal(&self, id: &str) -> ServiceResult<()> {
        let mut goals: Vec<Goal> = load_collection_for_update(&self.store)?;
        let index = position_of(&goals, id)?;
        goals.remove(index);
        save_collection(&self.store, &goals)?;
        info!("event=goal_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn add_milestone(&self, goal_id: &str, description: &str) -> ServiceResult<Milestone> {
        require_text("description", description)?;

        let mut goals: Vec<Goal> = load_collection_for_update(&self.store)?;
        let goal = find_mut(&mut goals, goal_id)?;
        let milestone = Milestone::new(description.trim());
        goal.milestones.push(milestone.clone());
        save_collection(&self.store, &goals)?;
        Ok(milestone)
    }

    /// Flips a milestone's completed flag; returns the new value.
    pub fn toggle_milestone(&self, goal_id: &str, milestone_id: &str) -> ServiceResult<bool> {
        let mut goals: Vec<Goal> = load_collection_for_update(&self.store)?;
        let goal = find_mut(&mut goals, goal_id)?;
        let milestone = goal
            .milestones
            .iter_mut()
            .find(|milestone| milestone.id == milestone_id)
            .ok_or_else(|| ServiceError::NotFound {
                kind: "milestone",
                id: milestone_id.to_string(),
            })?;
        milestone.completed = !milestone.completed;
        let completed = milestone.completed;
        save_collection(&self.store, &goals)?;
        Ok(completed)
    }
}
