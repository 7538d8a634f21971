//! Export/import of every stored key as one JSON file.
//!
//! # Responsibility
//! - Bundle collection and weekly keys into a single portable document.
//! - Restore a bundle atomically after type-checking its members.
//!
//! # Invariants
//! - Stored values are embedded verbatim; export then import reproduces the
//!   stored text byte for byte.
//! - Import writes nothing unless every known member passes validation.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod bundle;

pub use bundle::{export_bundle, import_bundle, ImportReport, EXPORT_FILE_NAME};

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug)]
pub enum TransferError {
    /// The file is not a JSON object.
    Malformed(serde_json::Error),
    /// A member has the wrong shape or fails record validation.
    InvalidMember { key: String, source: RepoError },
    Repo(RepoError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "import file is not a JSON object: {err}"),
            Self::InvalidMember { key, source } => {
                write!(f, "import member `{key}` rejected: {source}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::InvalidMember { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for TransferError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
