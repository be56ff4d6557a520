use rusqlite::Connection;
use tidylist_core::db::{open_db, open_db_in_memory};
use tidylist_core::{
    RepoError, SnapshotRepository, SqliteSnapshotRepository, TodoStore, SNAPSHOT_KEY,
};

#[test]
fn missing_snapshot_loads_as_empty_list() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(conn).unwrap();

    let list = repo.load_snapshot().unwrap();
    assert!(list.is_empty());
}

#[test]
fn malformed_snapshot_loads_as_empty_list() {
    for garbage in ["this is not json", "{\"id\": 1}", "[{\"id\": \"wrong type\"}]"] {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, 0);",
            rusqlite::params![SNAPSHOT_KEY, garbage],
        )
        .unwrap();

        let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
        let list = repo.load_snapshot().unwrap();
        assert!(list.is_empty(), "value `{garbage}` should load as empty");
    }
}

#[test]
fn roundtrip_preserves_order_ids_text_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tidylist.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
        let mut store = TodoStore::open(repo).unwrap();
        store.add("oldest").unwrap();
        store.add("middle").unwrap();
        store.add("newest").unwrap();
        let middle_id = store.tasks().tasks()[1].id;
        store.toggle(middle_id).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
    let store = TodoStore::open(repo).unwrap();

    let tasks = store.tasks().tasks();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].text, "newest");
    assert_eq!(tasks[1].text, "middle");
    assert_eq!(tasks[2].text, "oldest");
    assert!(tasks[1].completed);
    assert!(!tasks[0].completed);
    assert!(tasks[0].id > tasks[1].id && tasks[1].id > tasks[2].id);
}

#[test]
fn saved_value_matches_wire_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tidylist.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
        let mut store = TodoStore::open(repo).unwrap();
        store.add("first").unwrap();
        store.add("second").unwrap();
    }

    let raw_conn = Connection::open(&path).unwrap();
    let raw: String = raw_conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1;",
            [SNAPSHOT_KEY],
            |row| row.get(0),
        )
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);

    let newest = items[0].as_object().unwrap();
    assert_eq!(newest.len(), 3);
    assert!(newest["id"].is_i64());
    assert_eq!(newest["text"], "second");
    assert_eq!(newest["completed"], false);
    assert_eq!(items[1]["text"], "first");
}

#[test]
fn every_mutation_is_persisted_before_returning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tidylist.db");

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
    let mut store = TodoStore::open(repo).unwrap();
    store.add("persist me").unwrap();
    let id = store.tasks().tasks()[0].id;
    store.toggle(id).unwrap();

    // A second reader sees the toggled state without the store being
    // dropped or flushed explicitly.
    let reader = SqliteSnapshotRepository::try_new(open_db(&path).unwrap()).unwrap();
    let persisted = reader.load_snapshot().unwrap();
    assert_eq!(persisted.len(), 1);
    assert!(persisted.get(id).unwrap().completed);
}

#[test]
fn restart_generates_ids_above_restored_ones() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tidylist.db");

    let first_id = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
        let mut store = TodoStore::open(repo).unwrap();
        store.add("before restart").unwrap();
        store.tasks().tasks()[0].id
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(conn).unwrap();
    let mut store = TodoStore::open(repo).unwrap();
    store.add("after restart").unwrap();

    let second_id = store.tasks().tasks()[0].id;
    assert!(second_id > first_id);
    assert_eq!(store.tasks().len(), 2);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteSnapshotRepository::try_new(conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        tidylist_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteSnapshotRepository::try_new(conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("kv_store"))
    ));
}
