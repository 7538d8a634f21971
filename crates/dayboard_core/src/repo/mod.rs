//! Persistence layer over the key/value store.
//!
//! # Responsibility
//! - Own the SQLite key/value table and its access contract.
//! - Map collection keys to typed records with JSON (de)serialization.
//!
//! # Invariants
//! - Collection writes validate every record before touching storage.
//! - Malformed stored JSON degrades to the collection default on read; it is
//!   logged, never surfaced as an error.
//! - Writes never replace a stored collection that failed to decode.

pub mod collection;
pub mod keys;
pub mod kv_repo;

pub use collection::{
    check_collection, load_collection, load_collection_for_update, load_document, save_collection,
    save_document, StoredCollection,
};
pub use kv_repo::{KeyValueStore, RepoError, RepoResult, SqliteKeyValueStore};
