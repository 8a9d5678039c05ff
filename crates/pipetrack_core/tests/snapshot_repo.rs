use pipetrack_core::db::migrations::latest_version;
use pipetrack_core::db::open_db_in_memory;
use pipetrack_core::{
    Company, Project, RepoError, SnapshotRepository, SqliteSnapshotRepository, Status, StoredState,
    KEY_PINNED, KEY_PROJECTS,
};
use rusqlite::Connection;

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteSnapshotRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_storage_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSnapshotRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("storage"))
    ));
}

#[test]
fn load_on_fresh_database_reports_both_keys_absent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    let stored = repo.load().unwrap();
    assert_eq!(stored, StoredState::default());
}

#[test]
fn save_and_load_round_trips_projects_and_pins() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    let projects = vec![Project {
        id: 1,
        name: "Deals".to_string(),
        companies: vec![Company::new(101, "TechCorp", Status::Green, 50000.0)],
    }];
    let pinned = vec![1];
    repo.save(&projects, &pinned).unwrap();

    let stored = repo.load().unwrap();
    assert_eq!(stored.projects.as_deref(), Some(projects.as_slice()));
    assert_eq!(stored.pinned.as_deref(), Some(pinned.as_slice()));
}

#[test]
fn save_writes_both_keys_together() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    repo.save(&[], &[]).unwrap();

    assert_eq!(stored_value(&conn, KEY_PROJECTS), "[]");
    assert_eq!(stored_value(&conn, KEY_PINNED), "[]");

    let key_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM storage;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(key_count, 2);
}

#[test]
fn corrupt_projects_blob_is_a_typed_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    write_raw(&conn, KEY_PROJECTS, "{not json");
    let err = repo.load().unwrap_err();
    assert!(matches!(err, RepoError::Corrupt { key, .. } if key == KEY_PROJECTS));
}

#[test]
fn corrupt_pinned_blob_is_a_typed_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    write_raw(&conn, KEY_PROJECTS, "[]");
    write_raw(&conn, KEY_PINNED, "[\"not-an-id\"]");
    let err = repo.load().unwrap_err();
    assert!(matches!(err, RepoError::Corrupt { key, .. } if key == KEY_PINNED));
}

#[test]
fn unknown_status_in_blob_is_corrupt() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    write_raw(
        &conn,
        KEY_PROJECTS,
        r#"[{"id":1,"name":"P","companies":[{"id":2,"name":"C","status":"purple","value":1.0}]}]"#,
    );
    let err = repo.load().unwrap_err();
    assert!(matches!(err, RepoError::Corrupt { key, .. } if key == KEY_PROJECTS));
}

#[test]
fn negative_value_in_blob_is_clamped_on_load() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    write_raw(
        &conn,
        KEY_PROJECTS,
        r#"[{"id":1,"name":"P","companies":[{"id":2,"name":"C","status":"green","value":-500.0}]}]"#,
    );
    let stored = repo.load().unwrap();
    let projects = stored.projects.unwrap();
    assert_eq!(projects[0].companies[0].value, 0.0);
}

fn stored_value(conn: &Connection, key: &str) -> String {
    conn.query_row("SELECT value FROM storage WHERE key = ?1;", [key], |row| {
        row.get(0)
    })
    .unwrap()
}

fn write_raw(conn: &Connection, key: &str, value: &str) {
    conn.execute(
        "INSERT INTO storage (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
        [key, value],
    )
    .unwrap();
}
