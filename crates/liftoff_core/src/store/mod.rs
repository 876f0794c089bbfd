//! Durable key/value port shared by every personalization component.
//!
//! # Responsibility
//! - Define the single storage contract (`get`/`set`/`remove`) that the
//!   library, personalization and tier components receive explicitly.
//! - Provide a SQLite adapter for real profiles and an in-memory fake.
//! - Open and upgrade the SQLite file backing the durable adapter.
//!
//! # Invariants
//! - Values are opaque UTF-8 strings; callers own their encoding.
//! - `set` replaces the full value for a key; there are no partial updates.
//! - Concurrent writers are not reconciled: last writer wins.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod open;
pub mod schema;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use open::{open_db, open_db_in_memory};
pub use sqlite::SqliteKeyValueStore;

/// Fixed key names of the persisted documents.
pub mod keys {
    /// JSON library document (folders and items).
    pub const LIBRARY: &str = "library";
    /// Bare theme id.
    pub const THEME: &str = "theme";
    /// Bare text-size id.
    pub const TEXT_SIZE: &str = "textSize";
    /// Bare subscription tier label.
    pub const TIER: &str = "tier";
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by key/value store adapters.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Store file was written by a newer build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Write rejected because the store is full.
    QuotaExceeded { key: String, limit_bytes: usize },
    /// Connection was not opened through `open_db*`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
            Self::QuotaExceeded { key, limit_bytes } => write!(
                f,
                "store quota of {limit_bytes} bytes exceeded while writing `{key}`"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "key/value store requires schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::QuotaExceeded { .. } => None,
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Storage contract for persisted personalization documents.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Writes the full value for `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
