//! Daily reflection journal entries.

use super::{new_record_id, normalize_tags, require_text, RecordId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionEntry {
    pub id: RecordId,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default)]
    pub lessons: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ReflectionEntry {
    pub fn new<I, S>(
        date: NaiveDate,
        content: impl Into<String>,
        lessons: impl Into<String>,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: new_record_id(),
            date,
            content: content.into(),
            lessons: lessons.into(),
            tags: normalize_tags(tags),
        }
    }

    /// Case-insensitive match over content, lessons and tags.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.content.to_lowercase().contains(&needle)
            || self.lessons.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("content", &self.content)?;
        let normalized = normalize_tags(&self.tags);
        if normalized.len() != self.tags.len() {
            let duplicate = self
                .tags
                .iter()
                .find(|tag| !normalized.contains(tag))
                .cloned()
                .unwrap_or_default();
            return Err(ValidationError::Duplicate {
                field: "tags",
                value: duplicate,
            });
        }
        Ok(())
    }
}
