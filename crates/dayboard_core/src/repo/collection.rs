//! Typed JSON collections and documents on top of [`KeyValueStore`].
//!
//! A collection is a whole `Vec<T>` serialized under one key. Every change
//! rewrites the full collection.

use super::keys;
use super::kv_repo::{KeyValueStore, RepoError, RepoResult};
use crate::model::goal::Goal;
use crate::model::habit::Habit;
use crate::model::reflection::ReflectionEntry;
use crate::model::settings::{default_notification_settings, NotificationSetting, Reminder};
use crate::model::skill::Skill;
use crate::model::task::Task;
use crate::model::ValidationError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Record type persisted as a whole collection under a fixed key.
pub trait StoredCollection: Serialize + DeserializeOwned + Sized {
    const KEY: &'static str;

    fn validate_record(&self) -> Result<(), ValidationError>;

    /// Collection returned when the key is absent or unreadable.
    fn default_collection() -> Vec<Self> {
        Vec::new()
    }
}

macro_rules! stored_collection {
    ($ty:ty, $key:expr) => {
        impl StoredCollection for $ty {
            const KEY: &'static str = $key;

            fn validate_record(&self) -> Result<(), ValidationError> {
                self.validate()
            }
        }
    };
}

stored_collection!(Goal, keys::GOALS);
stored_collection!(Habit, keys::HABITS);
stored_collection!(Task, keys::TASKS);
stored_collection!(ReflectionEntry, keys::REFLECTIONS);
stored_collection!(Skill, keys::SKILLS);
stored_collection!(Reminder, keys::REMINDERS);

impl StoredCollection for NotificationSetting {
    const KEY: &'static str = keys::NOTIFICATION_SETTINGS;

    fn validate_record(&self) -> Result<(), ValidationError> {
        crate::model::require_text("type", &self.kind)
    }

    fn default_collection() -> Vec<Self> {
        default_notification_settings()
    }
}

/// Loads the collection stored under `T::KEY`.
///
/// Absent keys yield `T::default_collection()`. Malformed JSON is logged and
/// also yields the default.
pub fn load_collection<T, S>(store: &S) -> RepoResult<Vec<T>>
where
    T: StoredCollection,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get_raw(T::KEY)? else {
        return Ok(T::default_collection());
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => Ok(items),
        Err(err) => {
            warn!(
                "event=collection_load module=repo status=fallback key={} bytes={} error={}",
                T::KEY,
                raw.len(),
                err
            );
            Ok(T::default_collection())
        }
    }
}

/// Loads the collection ahead of a rewrite.
///
/// Unlike [`load_collection`], a stored value that fails to decode is an
/// error: rewriting from the fallback would drop every stored record.
pub fn load_collection_for_update<T, S>(store: &S) -> RepoResult<Vec<T>>
where
    T: StoredCollection,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get_raw(T::KEY)? else {
        return Ok(T::default_collection());
    };

    serde_json::from_str::<Vec<T>>(&raw).map_err(|source| {
        warn!(
            "event=collection_load module=repo status=rejected key={} bytes={} error={}",
            T::KEY,
            raw.len(),
            source
        );
        RepoError::Json {
            key: T::KEY.to_string(),
            source,
        }
    })
}

/// Validates and writes the whole collection under `T::KEY`.
pub fn save_collection<T, S>(store: &S, items: &[T]) -> RepoResult<()>
where
    T: StoredCollection,
    S: KeyValueStore + ?Sized,
{
    validate_all(T::KEY, items)?;
    let raw = serde_json::to_string(items).map_err(|source| RepoError::Json {
        key: T::KEY.to_string(),
        source,
    })?;
    store.put_raw(T::KEY, &raw)
}

/// Parses and validates raw collection JSON without writing it.
///
/// Returns the number of records.
pub fn check_collection<T: StoredCollection>(raw: &str) -> RepoResult<usize> {
    let items: Vec<T> = serde_json::from_str(raw).map_err(|source| RepoError::Json {
        key: T::KEY.to_string(),
        source,
    })?;
    validate_all(T::KEY, &items)?;
    Ok(items.len())
}

/// Loads a single JSON document. Absent or malformed values yield `None`.
pub fn load_document<T, S>(store: &S, key: &str) -> RepoResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get_raw(key)? else {
        return Ok(None);
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(document) => Ok(Some(document)),
        Err(err) => {
            warn!(
                "event=document_load module=repo status=fallback key={key} bytes={} error={err}",
                raw.len()
            );
            Ok(None)
        }
    }
}

pub fn save_document<T, S>(store: &S, key: &str, document: &T) -> RepoResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(document).map_err(|source| RepoError::Json {
        key: key.to_string(),
        source,
    })?;
    store.put_raw(key, &raw)
}

fn validate_all<T: StoredCollection>(key: &str, items: &[T]) -> RepoResult<()> {
    for (index, item) in items.iter().enumerate() {
        item.validate_record()
            .map_err(|source| RepoError::Validation {
                key: key.to_string(),
                index,
                source,
            })?;
    }
    Ok(())
}
