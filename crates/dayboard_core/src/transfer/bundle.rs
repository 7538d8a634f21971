use super::{TransferError, TransferResult};
use crate::model::goal::Goal;
use crate::model::habit::Habit;
use crate::model::reflection::ReflectionEntry;
use crate::model::settings::{NotificationSetting, Reminder};
use crate::model::skill::Skill;
use crate::model::task::Task;
use crate::model::weekly::{WeeklyPlan, WeeklyReview};
use crate::repo::keys::{
    self, is_weekly_key, COLLECTION_KEYS, WEEKLY_PLAN_PREFIX, WEEKLY_REVIEW_PREFIX,
};
use crate::repo::{check_collection, KeyValueStore, RepoError, RepoResult, StoredCollection};
use chrono::NaiveDate;
use log::{info, warn};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::value::RawValue;
use std::collections::BTreeMap;

/// Suggested file name for exports.
pub const EXPORT_FILE_NAME: &str = "productivity_data.json";

const EMPTY_COLLECTION: &str = "[]";

/// Outcome of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Keys written from the file, in write order.
    pub imported: Vec<String>,
    /// Collection keys absent (or `null`) in the file and reset to `[]`.
    pub defaulted: Vec<String>,
    /// Members the importer does not know; left untouched.
    pub ignored: Vec<String>,
}

/// Ordered JSON object whose values are emitted verbatim.
struct Bundle {
    entries: Vec<(String, Box<RawValue>)>,
}

impl Serialize for Bundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Serializes every collection key followed by every weekly review/plan key
/// into one pretty-printed JSON object.
///
/// Absent collection keys are exported as the collection default, so an
/// import of the file reads back the same values.
pub fn export_bundle<S: KeyValueStore + ?Sized>(store: &S) -> TransferResult<String> {
    let mut entries = Vec::new();

    for key in COLLECTION_KEYS {
        let raw = match store.get_raw(key)? {
            Some(raw) => raw,
            None => default_member(key)?,
        };
        let value = match RawValue::from_string(raw) {
            Ok(value) => value,
            Err(err) => {
                warn!("event=export module=transfer status=fallback key={key} error={err}");
                raw_json(key, EMPTY_COLLECTION.to_string())?
            }
        };
        entries.push((key.to_string(), value));
    }

    for prefix in [WEEKLY_REVIEW_PREFIX, WEEKLY_PLAN_PREFIX] {
        for key in store.list_keys(prefix)? {
            let Some(raw) = store.get_raw(&key)? else {
                continue;
            };
            match RawValue::from_string(raw) {
                Ok(value) => entries.push((key, value)),
                Err(err) => {
                    warn!("event=export module=transfer status=skipped key={key} error={err}");
                }
            }
        }
    }

    let count = entries.len();
    let text = serde_json::to_string_pretty(&Bundle { entries }).map_err(|source| {
        TransferError::Repo(RepoError::Json {
            key: "export".to_string(),
            source,
        })
    })?;
    info!(
        "event=export module=transfer status=ok keys={count} bytes={}",
        text.len()
    );
    Ok(text)
}

/// Restores a bundle produced by [`export_bundle`].
///
/// Known members are type-checked and validated first; then all keys are
/// written in one transaction. Collection members that are missing or
/// `null` are reset to `[]`.
pub fn import_bundle<S: KeyValueStore + ?Sized>(
    store: &S,
    text: &str,
) -> TransferResult<ImportReport> {
    let members: BTreeMap<String, Box<RawValue>> =
        serde_json::from_str(text).map_err(TransferError::Malformed)?;

    let mut report = ImportReport::default();
    let mut writes: Vec<(String, String)> = Vec::new();

    for key in COLLECTION_KEYS {
        match members.get(key).map(|raw| raw.get()) {
            Some(raw) if raw != "null" => {
                check_member(key, raw).map_err(|source| TransferError::InvalidMember {
                    key: key.to_string(),
                    source,
                })?;
                writes.push((key.to_string(), raw.to_string()));
                report.imported.push(key.to_string());
            }
            _ => {
                writes.push((key.to_string(), EMPTY_COLLECTION.to_string()));
                report.defaulted.push(key.to_string());
            }
        }
    }

    for (key, raw) in &members {
        if COLLECTION_KEYS.contains(&key.as_str()) {
            continue;
        }
        if !is_weekly_key(key) || weekly_key_date(key).is_none() {
            report.ignored.push(key.clone());
            continue;
        }
        check_weekly(key, raw.get()).map_err(|source| TransferError::InvalidMember {
            key: key.clone(),
            source,
        })?;
        writes.push((key.clone(), raw.get().to_string()));
        report.imported.push(key.clone());
    }

    store.put_many(&writes)?;
    info!(
        "event=import module=transfer status=ok imported={} defaulted={} ignored={}",
        report.imported.len(),
        report.defaulted.len(),
        report.ignored.len()
    );
    Ok(report)
}

fn default_member(key: &str) -> TransferResult<String> {
    if key != keys::NOTIFICATION_SETTINGS {
        return Ok(EMPTY_COLLECTION.to_string());
    }
    serde_json::to_string(&NotificationSetting::default_collection()).map_err(|source| {
        TransferError::Repo(RepoError::Json {
            key: key.to_string(),
            source,
        })
    })
}

fn check_member(key: &str, raw: &str) -> RepoResult<usize> {
    match key {
        keys::GOALS => check_collection::<Goal>(raw),
        keys::HABITS => check_collection::<Habit>(raw),
        keys::SKILLS => check_collection::<Skill>(raw),
        keys::REFLECTIONS => check_collection::<ReflectionEntry>(raw),
        keys::NOTIFICATION_SETTINGS => check_collection::<NotificationSetting>(raw),
        keys::TASKS => check_collection::<Task>(raw),
        keys::REMINDERS => check_collection::<Reminder>(raw),
        other => Err(RepoError::InvalidKey(other.to_string())),
    }
}

fn check_weekly(key: &str, raw: &str) -> RepoResult<()> {
    let json_error = |source| RepoError::Json {
        key: key.to_string(),
        source,
    };
    if key.starts_with(WEEKLY_REVIEW_PREFIX) {
        serde_json::from_str::<WeeklyReview>(raw).map_err(json_error)?;
        return Ok(());
    }
    let plan = serde_json::from_str::<WeeklyPlan>(raw).map_err(json_error)?;
    plan.validate().map_err(|source| RepoError::Validation {
        key: key.to_string(),
        index: 0,
        source,
    })
}

fn weekly_key_date(key: &str) -> Option<NaiveDate> {
    let suffix = key
        .strip_prefix(WEEKLY_REVIEW_PREFIX)
        .or_else(|| key.strip_prefix(WEEKLY_PLAN_PREFIX))?;
    NaiveDate::parse_from_str(suffix, "%Y-%m-%d").ok()
}

fn raw_json(key: &str, text: String) -> TransferResult<Box<RawValue>> {
    RawValue::from_string(text).map_err(|source| {
        TransferError::Repo(RepoError::Json {
            key: key.to_string(),
            source,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::weekly_key_date;
    use chrono::NaiveDate;

    #[test]
    fn weekly_key_date_requires_iso_suffix() {
        assert_eq!(
            weekly_key_date("weekly-plan-2024-02-05"),
            NaiveDate::from_ymd_opt(2024, 2, 5)
        );
        assert_eq!(weekly_key_date("weekly-review-soon"), None);
        assert_eq!(weekly_key_date("goals"), None);
    }
}
