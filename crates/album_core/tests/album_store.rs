use album_core::db::migrations::latest_version;
use album_core::{Album, AlbumStore, SqliteAlbumStore, StoreError};
use rusqlite::Connection;

fn seeded_store(rows: &[(&str, &str)]) -> SqliteAlbumStore {
    let store = SqliteAlbumStore::open_in_memory().unwrap();
    for (artist, name) in rows {
        store.insert(artist, name).unwrap();
    }
    store
}

#[test]
fn insert_then_list_returns_rows_in_id_order() {
    let store = seeded_store(&[
        ("Pink Floyd", "The Wall"),
        ("Queen", "A Night at the Opera"),
        ("The Beatles", "Abbey Road"),
    ]);

    let all = store.query_all().unwrap();
    assert_eq!(
        all,
        vec![
            Album::new(1, "Pink Floyd", "The Wall"),
            Album::new(2, "Queen", "A Night at the Opera"),
            Album::new(3, "The Beatles", "Abbey Road"),
        ]
    );
}

#[test]
fn list_on_empty_table_is_empty() {
    let store = SqliteAlbumStore::open_in_memory().unwrap();
    assert!(store.query_all().unwrap().is_empty());
}

#[test]
fn query_by_id_finds_inserted_row_and_misses_unknown_id() {
    let store = SqliteAlbumStore::open_in_memory().unwrap();
    let id = store.insert("Radiohead", "OK Computer").unwrap();

    assert_eq!(
        store.query_by_id(id).unwrap(),
        Some(Album::new(id, "Radiohead", "OK Computer"))
    );
    assert_eq!(store.query_by_id(id + 100).unwrap(), None);
}

#[test]
fn update_overwrites_fields_and_reports_zero_for_missing_row() {
    let store = seeded_store(&[("Queen", "Jazz")]);

    assert_eq!(store.update(1, "Queen", "News of the World").unwrap(), 1);
    assert_eq!(
        store.query_by_id(1).unwrap(),
        Some(Album::new(1, "Queen", "News of the World"))
    );

    assert_eq!(store.update(99, "Nobody", "Nothing").unwrap(), 0);
    assert_eq!(store.query_all().unwrap().len(), 1);
}

#[test]
fn delete_removes_exactly_one_row() {
    let store = seeded_store(&[("Queen", "Jazz"), ("Queen", "Innuendo")]);

    assert_eq!(store.delete(1).unwrap(), 1);
    assert_eq!(store.query_by_id(1).unwrap(), None);
    assert_eq!(store.delete(1).unwrap(), 0);
    assert_eq!(store.query_all().unwrap(), vec![Album::new(2, "Queen", "Innuendo")]);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let store = seeded_store(&[("A", "one"), ("B", "two")]);
    store.delete(2).unwrap();

    let id = store.insert("C", "three").unwrap();
    assert_eq!(id, 3);
}

#[test]
fn artist_search_is_containment_not_prefix() {
    let store = seeded_store(&[("The Beatles", "Abbey Road"), ("Queen", "Jazz")]);

    let hits = store.query_by_artist_substring("eat").unwrap();
    assert_eq!(hits, vec![Album::new(1, "The Beatles", "Abbey Road")]);
}

#[test]
fn substring_search_follows_like_case_rules() {
    let store = seeded_store(&[("The Beatles", "Abbey Road"), ("Queen", "Jazz")]);

    assert_eq!(store.query_by_artist_substring("QUEEN").unwrap().len(), 1);
    assert_eq!(store.query_by_name_substring("road").unwrap().len(), 1);
    assert_eq!(store.query_by_name_substring("").unwrap().len(), 2);
}

#[test]
fn search_treats_wildcards_literally() {
    let store = seeded_store(&[("Artist", "100% Live"), ("Artist", "1000 Live")]);

    let hits = store.query_by_name_substring("0%").unwrap();
    assert_eq!(hits, vec![Album::new(1, "Artist", "100% Live")]);
    assert!(store.query_by_artist_substring("A_tist").unwrap().is_empty());
}

#[test]
fn not_null_constraint_rejects_null_fields() {
    let store = SqliteAlbumStore::open_in_memory().unwrap();

    let result = store.connection().execute(
        "INSERT INTO albums (artist, name) VALUES (?1, NULL);",
        ["Queen"],
    );
    assert!(result.is_err());
    assert!(store.query_all().unwrap().is_empty());
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteAlbumStore::new(conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_albums_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteAlbumStore::new(conn),
        Err(StoreError::MissingRequiredTable("albums"))
    ));
}

#[test]
fn write_on_dropped_table_surfaces_as_error() {
    let store = SqliteAlbumStore::open_in_memory().unwrap();
    store
        .connection()
        .execute_batch("DROP TABLE albums;")
        .unwrap();

    assert!(matches!(store.insert("Queen", "Jazz"), Err(StoreError::Db(_))));
    assert!(store.query_all().is_err());
}
