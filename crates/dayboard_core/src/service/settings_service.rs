//! Notification preferences and reminder schedule.
//!
//! # Invariants
//! - Reading settings before anything was saved yields the default set.
//! - Toggling an unknown notification type is reported as not found.

use super::{find_mut, position_of, ServiceError, ServiceResult};
use crate::model::settings::{NotificationSetting, Reminder, ReminderKind};
use crate::repo::{
    load_collection, load_collection_for_update, save_collection, KeyValueStore,
};
use log::info;

pub struct SettingsService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SettingsService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn notification_settings(&self) -> ServiceResult<Vec<NotificationSetting>> {
        Ok(load_collection(&self.store)?)
    }

    /// Flips one notification type; returns the new enabled flag.
    pub fn toggle_notification(&self, kind: &str) -> ServiceResult<bool> {
        let mut settings: Vec<NotificationSetting> = load_collection_for_update(&self.store)?;
        let setting = settings
            .iter_mut()
            .find(|setting| setting.kind.eq_ignore_ascii_case(kind.trim()))
            .ok_or_else(|| ServiceError::NotFound {
                kind: "notification setting",
                id: kind.to_string(),
            })?;
        setting.enabled = !setting.enabled;
        let enabled = setting.enabled;
        save_collection(&self.store, &settings)?;
        info!("event=notification_toggle module=service status=ok enabled={enabled}");
        Ok(enabled)
    }

    pub fn list_reminders(&self) -> ServiceResult<Vec<Reminder>> {
        Ok(load_collection(&self.store)?)
    }

    pub fn add_reminder(
        &self,
        kind: ReminderKind,
        time: &str,
        days: &[String],
    ) -> ServiceResult<Reminder> {
        let reminder = Reminder::new(kind, time.trim(), days);
        reminder.validate()?;
        let mut reminders: Vec<Reminder> = load_collection_for_update(&self.store)?;
        reminders.push(reminder.clone());
        save_collection(&self.store, &reminders)?;
        info!(
            "event=reminder_add module=service status=ok id={} days={}",
            reminder.id,
            reminder.days.len()
        );
        Ok(reminder)
    }

    /// Flips a reminder's enabled flag; returns the new value.
    pub fn toggle_reminder(&self, id: &str) -> ServiceResult<bool> {
        let mut reminders: Vec<Reminder> = load_collection_for_update(&self.store)?;
        let reminder = find_mut(&mut reminders, id)?;
        reminder.enabled = !reminder.enabled;
        let enabled = reminder.enabled;
        save_collection(&self.store, &reminders)?;
        Ok(enabled)
    }

    pub fn delete_reminder(&self, id: &str) -> ServiceResult<()> {
        let mut reminders: Vec<Reminder> = load_collection_for_update(&self.store)?;
        let index = position_of(&reminders, id)?;
        reminders.remove(index);
        save_collection(&self.store, &reminders)?;
        Ok(())
    }
}
