use liftoff_core::store::keys;
use liftoff_core::store::schema::LATEST_VERSION;
use liftoff_core::{
    open_db, open_db_in_memory, KeyValueStore, LibraryRepository, SqliteKeyValueStore, StoreError,
};
use rusqlite::Connection;

#[test]
fn open_upgrades_to_latest_schema() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, LATEST_VERSION);
}

#[test]
fn set_overwrites_and_remove_deletes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store.set(keys::THEME, "sunset").unwrap();
    store.set(keys::THEME, "arctic").unwrap();
    assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("arctic"));
    assert_eq!(store.keys().unwrap(), vec!["theme".to_string()]);

    store.remove(keys::THEME).unwrap();
    store.remove(keys::THEME).unwrap();
    assert_eq!(store.get(keys::THEME).unwrap(), None);
}

#[test]
fn unupgraded_connection_is_rejected() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKeyValueStore::try_new(&conn)
        .err()
        .expect("raw connection must be rejected");
    assert!(matches!(
        err,
        StoreError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn values_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();
        store.set(keys::TIER, "ultra").unwrap();
        LibraryRepository::new(&store).ensure_initialized().unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert_eq!(store.get(keys::TIER).unwrap().as_deref(), Some("ultra"));
    let library = store.get(keys::LIBRARY).unwrap().expect("library persisted");
    assert!(library.contains("\"flowcharts\""));
}

#[test]
fn file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.sqlite3");
    {
        let conn = Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", LATEST_VERSION + 1)
            .unwrap();
    }

    let err = open_db(&path).expect_err("newer schema must be refused");
    assert!(matches!(err, StoreError::UnsupportedSchemaVersion { .. }));
}
