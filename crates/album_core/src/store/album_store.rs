//! Album store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/update/delete and filtered reads over `albums`.
//! - Verify the connection schema before any statement runs.
//!
//! # Invariants
//! - Ids come from `AUTOINCREMENT` and are never reused.
//! - Substring filters are literal containment matches under `LIKE` rules
//!   (ASCII case-insensitive).

use crate::db::migrations::{current_user_version, ALBUMS_TABLE, SCHEMA_VERSION};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::album::{Album, AlbumId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const ALBUM_SELECT_SQL: &str = "SELECT id, artist, name FROM albums";
const LIKE_ESCAPE: char = '\\';

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for album persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw CRUD and filter operations over the album table.
pub trait AlbumStore {
    /// Inserts a row and returns the assigned id.
    fn insert(&self, artist: &str, name: &str) -> StoreResult<AlbumId>;
    /// Returns every row ordered by id.
    fn query_all(&self) -> StoreResult<Vec<Album>>;
    fn query_by_id(&self, id: AlbumId) -> StoreResult<Option<Album>>;
    /// Overwrites artist/name; returns affected row count.
    fn update(&self, id: AlbumId, artist: &str, name: &str) -> StoreResult<usize>;
    /// Removes the row; returns affected row count.
    fn delete(&self, id: AlbumId) -> StoreResult<usize>;
    fn query_by_artist_substring(&self, pattern: &str) -> StoreResult<Vec<Album>>;
    fn query_by_name_substring(&self, pattern: &str) -> StoreResult<Vec<Album>>;
}

/// SQLite-backed album store owning its connection.
pub struct SqliteAlbumStore {
    conn: Connection,
}

impl SqliteAlbumStore {
    /// Wraps an already bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not current.
    /// - `MissingRequiredTable` when `albums` does not exist.
    pub fn new(conn: Connection) -> StoreResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (creating if needed) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::new(open_db(path)?)
    }

    /// Opens a fresh in-memory database and wraps it.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::new(open_db_in_memory()?)
    }

    /// Borrow of the underlying connection for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn query_like(&self, column: &str, pattern: &str) -> StoreResult<Vec<Album>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ALBUM_SELECT_SQL}
             WHERE {column} LIKE ?1 ESCAPE '{LIKE_ESCAPE}'
             ORDER BY id ASC;"
        ))?;
        let rows = stmt.query_map([contains_pattern(pattern)], parse_album_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl AlbumStore for SqliteAlbumStore {
    fn insert(&self, artist: &str, name: &str) -> StoreResult<AlbumId> {
        self.conn.execute(
            "INSERT INTO albums (artist, name) VALUES (?1, ?2);",
            params![artist, name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn query_all(&self) -> StoreResult<Vec<Album>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ALBUM_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt.query_map([], parse_album_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn query_by_id(&self, id: AlbumId) -> StoreResult<Option<Album>> {
        let album = self
            .conn
            .query_row(
                &format!("{ALBUM_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_album_row,
            )
            .optional()?;
        Ok(album)
    }

    fn update(&self, id: AlbumId, artist: &str, name: &str) -> StoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE albums SET artist = ?1, name = ?2 WHERE id = ?3;",
            params![artist, name, id],
        )?;
        Ok(changed)
    }

    fn delete(&self, id: AlbumId) -> StoreResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM albums WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn query_by_artist_substring(&self, pattern: &str) -> StoreResult<Vec<Album>> {
        self.query_like("artist", pattern)
    }

    fn query_by_name_substring(&self, pattern: &str) -> StoreResult<Vec<Album>> {
        self.query_like("name", pattern)
    }
}

fn parse_album_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get("id")?,
        artist: row.get("artist")?,
        name: row.get("name")?,
    })
}

/// Wraps `pattern` in `%...%`, escaping LIKE metacharacters.
fn contains_pattern(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len() + 2);
    escaped.push('%');
    for ch in pattern.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let actual_version = current_user_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(StoreError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [ALBUMS_TABLE],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(StoreError::MissingRequiredTable(ALBUMS_TABLE));
    }

    Ok(())
}
