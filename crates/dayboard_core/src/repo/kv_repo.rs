//! Key/value store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide raw string get/put over the `kv_entries` table.
//! - Offer an all-or-nothing batch write for imports.
//!
//! # Invariants
//! - Keys are non-empty; values are stored verbatim, byte for byte.
//! - `put_many` either writes every entry or none.

use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for store access and typed collection persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A record failed validation before being written under `key`.
    Validation {
        key: String,
        index: usize,
        source: ValidationError,
    },
    /// Value could not be encoded or decoded as JSON.
    Json {
        key: String,
        source: serde_json::Error,
    },
    InvalidKey(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation { key, index, source } => {
                write!(f, "invalid record #{index} in `{key}`: {source}")
            }
            Self::Json { key, source } => write!(f, "invalid JSON for `{key}`: {source}"),
            Self::InvalidKey(key) => write!(f, "invalid store key `{key}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw string key/value storage.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>>;
    fn put_raw(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Keys starting with `prefix`, sorted ascending. Empty prefix lists all.
    fn list_keys(&self, prefix: &str) -> RepoResult<Vec<String>>;
    fn put_many(&self, entries: &[(String, String)]) -> RepoResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn put_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).put_raw(key, value)
    }

    fn list_keys(&self, prefix: &str) -> RepoResult<Vec<String>> {
        (**self).list_keys(prefix)
    }

    fn put_many(&self, entries: &[(String, String)]) -> RepoResult<()> {
        (**self).put_many(entries)
    }
}

/// SQLite-backed key/value store.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

const UPSERT_SQL: &str = "INSERT INTO kv_entries (key, value, updated_at)
     VALUES (?1, ?2, strftime('%s', 'now') * 1000)
     ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at;";

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get_raw(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_raw(&self, key: &str, value: &str) -> RepoResult<()> {
        ensure_key(key)?;
        self.conn.execute(UPSERT_SQL, params![key, value])?;
        Ok(())
    }

    fn list_keys(&self, prefix: &str) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT key
             FROM kv_entries
             WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY key ASC;",
        )?;
        let keys = stmt
            .query_map([prefix], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn put_many(&self, entries: &[(String, String)]) -> RepoResult<()> {
        for (key, _) in entries {
            ensure_key(key)?;
        }

        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT_SQL)?;
            for (key, value) in entries {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn ensure_key(key: &str) -> RepoResult<()> {
    if key.trim().is_empty() {
        return Err(RepoError::InvalidKey(key.to_string()));
    }
    Ok(())
}
