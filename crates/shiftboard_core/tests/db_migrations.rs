use shiftboard_core::db::migrations::latest_version;
use shiftboard_core::db::{open_db, open_db_in_memory, reset_schema, DbError};
use shiftboard_core::{CaregiverRepository, SqliteCaregiverRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "caregivers");
    assert_table_exists(&conn, "shifts");
    assert_index_exists(&conn, "idx_shifts_slot");
}

#[test]
fn foreign_keys_are_enabled() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.db");

    let conn_first = open_db(&path).unwrap();
    SqliteCaregiverRepository::new(&conn_first)
        .create_caregiver("Kisha")
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count = SqliteCaregiverRepository::new(&conn_second)
        .count_caregivers()
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn legacy_double_booked_slots_fail_migration_and_keep_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE caregivers (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL);
         CREATE TABLE shifts (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             date TEXT NOT NULL,
             shift_type TEXT NOT NULL,
             caregiver_id INTEGER NOT NULL
         );
         INSERT INTO caregivers (name) VALUES ('Fatima'), ('Kisha');
         INSERT INTO shifts (date, shift_type, caregiver_id)
         VALUES ('2024-06-03', 'A', 1), ('2024-06-03', 'A', 2);",
    )
    .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Migration { version: 1, .. }));
    assert!(err.to_string().contains("migration 1"));

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM shifts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn reset_schema_drops_data_and_recreates_tables() {
    let mut conn = open_db_in_memory().unwrap();
    SqliteCaregiverRepository::new(&conn)
        .create_caregiver("Amanda")
        .unwrap();

    reset_schema(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_index_exists(&conn, "idx_shifts_slot");
    let count = SqliteCaregiverRepository::new(&conn)
        .count_caregivers()
        .unwrap();
    assert_eq!(count, 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert_schema_object(conn, "table", table_name);
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    assert_schema_object(conn, "index", index_name);
}

fn assert_schema_object(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
