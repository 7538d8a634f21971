//! Use-case services.
//!
//! # Responsibility
//! - Turn user actions (add, edit, toggle, delete) into load-modify-save
//!   cycles over whole collections.
//! - Keep CLI callers decoupled from storage and JSON details.
//!
//! # Invariants
//! - Records are validated before the collection is written.
//! - Lookups by id report `ServiceError::NotFound` instead of silently
//!   doing nothing.
//! - Date-dependent operations take `today` from the caller.

use crate::model::goal::Goal;
use crate::model::habit::Habit;
use crate::model::reflection::ReflectionEntry;
use crate::model::settings::Reminder;
use crate::model::skill::Skill;
use crate::model::task::Task;
use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod goal_service;
pub mod habit_service;
pub mod reflection_service;
pub mod settings_service;
pub mod skill_service;
pub mod summary_service;
pub mod task_query;
pub mod task_service;
pub mod weekly_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Validation(ValidationError),
    Repo(RepoError),
    NotFound { kind: &'static str, id: String },
    /// Position outside the current collection bounds.
    InvalidIndex { index: usize, len: usize },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidIndex { index, len } => {
                write!(f, "position {index} is out of range for {len} items")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidIndex { .. } => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation { source, .. } => Self::Validation(source),
            other => Self::Repo(other),
        }
    }
}

/// Record with a stable id inside a stored collection.
pub(crate) trait Identified {
    const KIND: &'static str;

    fn record_id(&self) -> &str;
}

macro_rules! identified {
    ($ty:ty, $kind:literal) => {
        impl Identified for $ty {
            const KIND: &'static str = $kind;

            fn record_id(&self) -> &str {
                &self.id
            }
        }
    };
}

identified!(Goal, "goal");
identified!(Habit, "habit");
identified!(Task, "task");
identified!(ReflectionEntry, "reflection");
identified!(Skill, "skill");
identified!(Reminder, "reminder");

pub(crate) fn position_of<T: Identified>(items: &[T], id: &str) -> ServiceResult<usize> {
    items
        .iter()
        .position(|item| item.record_id() == id)
        .ok_or_else(|| ServiceError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
}

pub(crate) fn find_mut<'a, T: Identified>(items: &'a mut [T], id: &str) -> ServiceResult<&'a mut T> {
    let index = position_of(items, id)?;
    Ok(&mut items[index])
}
