//! Habit use-case service.
//!
//! # Responsibility
//! - Add, edit, delete habits and toggle completion dates.
//! - Keep each habit's derived streak current on every write.

use super::{find_mut, position_of, ServiceResult};
use crate::model::habit::{tracking_window, Habit, HabitDraft};
use crate::repo::{
    load_collection, load_collection_for_update, save_collection, KeyValueStore,
};
use chrono::NaiveDate;
use log::{debug, info};

/// One check-box cell of a habit's tracking window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitDay {
    pub date: NaiveDate,
    pub completed: bool,
}

pub struct HabitService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HabitService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list_habits(&self) -> ServiceResult<Vec<Habit>> {
        Ok(load_collection(&self.store)?)
    }

    pub fn get_habit(&self, id: &str) -> ServiceResult<Habit> {
        let habits = self.list_habits()?;
        let index = position_of(&habits, id)?;
        Ok(habits[index].clone())
    }

    pub fn add_habit(&self, draft: HabitDraft) -> ServiceResult<Habit> {
        let habit = Habit::from_draft(draft);
        habit.validate()?;

        let mut habits: Vec<Habit> = load_collection_for_update(&self.store)?;
        habits.push(habit.clone());
        save_collection(&self.store, &habits)?;
        info!(
            "event=habit_add module=service status=ok id={} period={}",
            habit.id,
            habit.tracking_period.as_str()
        );
        Ok(habit)
    }

    /// Replaces editable fields; the streak is recomputed because frequency
    /// or period may have changed.
    pub fn edit_habit(&self, id: &str, draft: HabitDraft, today: NaiveDate) -> ServiceResult<Habit> {
        let mut habits: Vec<Habit> = load_collection_for_update(&self.store)?;
        let habit = find_mut(&mut habits, id)?;
        habit.apply_draft(draft, today);
        habit.validate()?;
        let updated = habit.clone();
        save_collection(&self.store, &habits)?;
        Ok(updated)
    }

    pub fn delete_habit(&self, id: &str) -> ServiceResult<()> {
        let mut habits: Vec<Habit> = load_collection_for_update(&self.store)?;
        let index = position_of(&habits, id)?;
        habits.remove(index);
        save_collection(&self.store, &habits)?;
        info!("event=habit_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Toggles completion on `date` and returns the updated habit.
    pub fn toggle_completion(
        &self,
        id: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> ServiceResult<Habit> {
        let mut habits: Vec<Habit> = load_collection_for_update(&self.store)?;
        let habit = find_mut(&mut habits, id)?;
        let completed = habit.toggle_date(date, today);
        let updated = habit.clone();
        save_collection(&self.store, &habits)?;
        debug!(
            "event=habit_toggle module=service status=ok id={} completed={} streak={}",
            updated.id, completed, updated.streak
        );
        Ok(updated)
    }

    /// Recomputes every stored streak against `today`.
    ///
    /// Streaks age as days pass without a write; callers refresh them when a
    /// session starts. Returns the number of habits whose streak changed.
    pub fn refresh_streaks(&self, today: NaiveDate) -> ServiceResult<usize> {
        let mut habits: Vec<Habit> = load_collection_for_update(&self.store)?;
        let mut changed = 0;
        for habit in &mut habits {
            let before = habit.streak;
            habit.refresh_streak(today);
            if habit.streak != before {
                changed += 1;
            }
        }
        if changed > 0 {
            save_collection(&self.store, &habits)?;
        }
        Ok(changed)
    }

    /// Check-box window for one habit, oldest first.
    pub fn tracking_days(&self, id: &str, today: NaiveDate) -> ServiceResult<Vec<HabitDay>> {
        let habit = self.get_habit(id)?;
        Ok(tracking_window(habit.tracking_period, today)
            .into_iter()
            .map(|date| HabitDay {
                date,
                completed: habit.is_completed_on(date),
            })
            .collect())
    }
}
