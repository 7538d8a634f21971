//! Weekly review and planning service.

use super::ServiceResult;
use crate::model::weekly::{week_start, WeeklyPlan, WeeklyReview};
use crate::repo::keys::{weekly_plan_key, weekly_review_key};
use crate::repo::{load_document, save_document, KeyValueStore};
use chrono::NaiveDate;
use log::info;

pub struct WeeklyService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> WeeklyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Review for the week containing `date`; a blank template when none
    /// is stored.
    pub fn review_for(&self, date: NaiveDate) -> ServiceResult<WeeklyReview> {
        let key = weekly_review_key(week_start(date));
        Ok(load_document(&self.store, &key)?.unwrap_or_else(|| WeeklyReview::blank(date)))
    }

    pub fn plan_for(&self, date: NaiveDate) -> ServiceResult<WeeklyPlan> {
        let key = weekly_plan_key(week_start(date));
        Ok(load_document(&self.store, &key)?.unwrap_or_else(|| WeeklyPlan::blank(date)))
    }

    /// Saves the review for the week containing `date`.
    ///
    /// The key comes from `date`, not from `review.week_starting`, so a
    /// document whose stored `weekStarting` is not a Monday is written back
    /// where [`review_for`](Self::review_for) finds it.
    pub fn save_review(&self, date: NaiveDate, review: &WeeklyReview) -> ServiceResult<()> {
        let week = week_start(date);
        save_document(&self.store, &weekly_review_key(week), review)?;
        info!("event=week_review_save module=service status=ok week={week}");
        Ok(())
    }

    pub fn save_plan(&self, date: NaiveDate, plan: &WeeklyPlan) -> ServiceResult<()> {
        plan.validate()?;
        let week = week_start(date);
        save_document(&self.store, &weekly_plan_key(week), plan)?;
        info!("event=week_plan_save module=service status=ok week={week}");
        Ok(())
    }

    /// Saves the review and plan together; nothing is written when the plan
    /// is invalid.
    pub fn save_week(
        &self,
        date: NaiveDate,
        review: &WeeklyReview,
        plan: &WeeklyPlan,
    ) -> ServiceResult<()> {
        plan.validate()?;
        self.save_review(date, review)?;
        self.save_plan(date, plan)
    }
}
