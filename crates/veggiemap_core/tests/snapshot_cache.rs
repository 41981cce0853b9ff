mod common;

use common::{restaurant, sample_collection};
use veggiemap_core::db::{open_db, open_db_in_memory};
use veggiemap_core::{Cuisine, PriceRange, RepoError, SnapshotStore, SqliteSnapshotStore};

#[test]
fn empty_cache_reads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSnapshotStore::new(&conn);

    assert!(store.read_snapshot().unwrap().is_none());
}

#[test]
fn write_then_read_preserves_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSnapshotStore::new(&conn);
    let collection = sample_collection();

    store.write_snapshot(&collection).unwrap();

    assert_eq!(store.read_snapshot().unwrap(), Some(collection));
}

#[test]
fn write_overwrites_previous_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSnapshotStore::new(&conn);

    store.write_snapshot(&sample_collection()).unwrap();
    let replacement = vec![restaurant("only", "Solo", Cuisine::Other, PriceRange::Budget, 1, 7)];
    store.write_snapshot(&replacement).unwrap();

    assert_eq!(store.read_snapshot().unwrap(), Some(replacement));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM local_storage;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn snapshot_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        SqliteSnapshotStore::new(&conn)
            .write_snapshot(&sample_collection())
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let cached = SqliteSnapshotStore::new(&conn).read_snapshot().unwrap().unwrap();
    assert_eq!(cached.len(), sample_collection().len());
}

#[test]
fn malformed_snapshot_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO local_storage (key, value) VALUES ('restaurants', ?1);",
        [r#"[{"id":"x","rating":9}]"#],
    )
    .unwrap();

    let err = SqliteSnapshotStore::new(&conn).read_snapshot().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn separate_keys_do_not_interfere() {
    let conn = open_db_in_memory().unwrap();
    let main = SqliteSnapshotStore::new(&conn);
    let scratch = SqliteSnapshotStore::with_key(&conn, "scratch");

    main.write_snapshot(&sample_collection()).unwrap();

    assert!(scratch.read_snapshot().unwrap().is_none());
    assert!(main.raw_value().unwrap().unwrap().starts_with('['));
}
