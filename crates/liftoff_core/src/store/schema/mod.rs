//! Schema of the durable key/value table.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version` and only grows.
//! - A connection is ready once it sits at `LATEST_VERSION` and the
//!   `kv_entries` table exists.

use super::{StoreError, StoreResult};
use log::info;
use rusqlite::{Connection, OptionalExtension};

/// Table holding every persisted document.
pub const KV_TABLE: &str = "kv_entries";

/// Ordered schema upgrades; step `n` moves the store to version `n`.
const UPGRADES: &[&str] = &[include_str!("v1_kv_entries.sql")];

/// Schema version this build reads and writes.
pub const LATEST_VERSION: u32 = UPGRADES.len() as u32;

/// Reads the version recorded on `conn`.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `conn` up to `LATEST_VERSION` in one transaction.
///
/// Returns the version the store was at before upgrading. Stores written by
/// a newer build are left untouched and rejected.
pub fn upgrade(conn: &mut Connection) -> StoreResult<u32> {
    let found = schema_version(conn)?;
    if found > LATEST_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            found,
            supported: LATEST_VERSION,
        });
    }

    let pending = &UPGRADES[found as usize..];
    if pending.is_empty() {
        return Ok(found);
    }

    let tx = conn.transaction()?;
    for sql in pending {
        tx.execute_batch(sql)?;
    }
    tx.pragma_update(None, "user_version", LATEST_VERSION)?;
    tx.commit()?;

    info!(
        "event=store_upgrade module=store status=ok from_version={} to_version={}",
        found, LATEST_VERSION
    );
    Ok(found)
}

/// Verifies `conn` can serve key/value reads and writes without upgrading.
///
/// # Errors
/// - `UninitializedConnection` when the version is behind or the table is
///   missing.
/// - `UnsupportedSchemaVersion` when a newer build wrote the store.
pub fn ensure_ready(conn: &Connection) -> StoreResult<()> {
    let found = schema_version(conn)?;
    if found > LATEST_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            found,
            supported: LATEST_VERSION,
        });
    }

    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [KV_TABLE],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if found < LATEST_VERSION || !has_table {
        return Err(StoreError::UninitializedConnection {
            expected_version: LATEST_VERSION,
            actual_version: found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_ready, schema_version, upgrade, LATEST_VERSION};
    use crate::store::StoreError;
    use rusqlite::Connection;

    #[test]
    fn upgrade_is_a_no_op_on_a_current_store() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(upgrade(&mut conn).unwrap(), 0);
        assert_eq!(upgrade(&mut conn).unwrap(), LATEST_VERSION);
        assert_eq!(schema_version(&conn).unwrap(), LATEST_VERSION);
        ensure_ready(&conn).unwrap();
    }

    #[test]
    fn newer_store_is_rejected_without_changes() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", LATEST_VERSION + 1)
            .unwrap();

        let err = upgrade(&mut conn).expect_err("newer schema");
        assert!(matches!(
            err,
            StoreError::UnsupportedSchemaVersion { found, supported }
                if found == LATEST_VERSION + 1 && supported == LATEST_VERSION
        ));
        assert!(matches!(
            ensure_ready(&conn),
            Err(StoreError::UnsupportedSchemaVersion { .. })
        ));
    }

    #[test]
    fn version_without_table_is_not_ready() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", LATEST_VERSION)
            .unwrap();

        assert!(matches!(
            ensure_ready(&conn),
            Err(StoreError::UninitializedConnection { .. })
        ));
    }
}
