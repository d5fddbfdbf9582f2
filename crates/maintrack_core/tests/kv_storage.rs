use maintrack_core::db::migrations::latest_version;
use maintrack_core::{KeyValueStore, RepoError, SqliteKvStore};
use rusqlite::Connection;

#[test]
fn sqlite_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    let store = SqliteKvStore::open(&path).unwrap();
    store.set_item("apartment-data-2024-1", "[]").unwrap();
    drop(store);

    let reopened = SqliteKvStore::open(&path).unwrap();
    assert_eq!(
        reopened.get_item("apartment-data-2024-1").unwrap().as_deref(),
        Some("[]")
    );
    assert_eq!(reopened.get_item("apartment-data-2024-2").unwrap(), None);
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvStore::try_new(conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteKvStore::try_new(conn),
        Err(RepoError::MissingRequiredTable("kv_entries"))
    ));
}

#[test]
fn store_rejects_kv_table_missing_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteKvStore::try_new(conn),
        Err(RepoError::MissingRequiredColumn {
            table: "kv_entries",
            column: "updated_at",
        })
    ));
}
