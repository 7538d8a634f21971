//! Daily reflection journal service.

use super::{position_of, ServiceResult};
use crate::model::reflection::ReflectionEntry;
use crate::repo::{
    load_collection, load_collection_for_update, save_collection, KeyValueStore,
};
use chrono::NaiveDate;
use log::info;

/// Input for a new reflection entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReflection {
    pub date: NaiveDate,
    pub content: String,
    pub lessons: String,
    pub tags: Vec<String>,
}

pub struct ReflectionService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ReflectionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Entries newest first (insertion order, most recent at the front).
    pub fn list_reflections(&self) -> ServiceResult<Vec<ReflectionEntry>> {
        Ok(load_collection(&self.store)?)
    }

    pub fn add_reflection(&self, input: NewReflection) -> ServiceResult<ReflectionEntry> {
        let entry = ReflectionEntry::new(input.date, input.content, input.lessons, input.tags);
        entry.validate()?;

        let mut entries: Vec<ReflectionEntry> = load_collection_for_update(&self.store)?;
        entries.insert(0, entry.clone());
        save_collection(&self.store, &entries)?;
        info!(
            "event=reflection_add module=service status=ok id={} tags={}",
            entry.id,
            entry.tags.len()
        );
        Ok(entry)
    }

    pub fn delete_reflection(&self, id: &str) -> ServiceResult<()> {
        let mut entries: Vec<ReflectionEntry> = load_collection_for_update(&self.store)?;
        let index = position_of(&entries, id)?;
        entries.remove(index);
        save_collection(&self.store, &entries)?;
        Ok(())
    }

    pub fn search_reflections(&self, needle: &str) -> ServiceResult<Vec<ReflectionEntry>> {
        Ok(self
            .list_reflections()?
            .into_iter()
            .filter(|entry| entry.matches(needle))
            .collect())
    }
}
