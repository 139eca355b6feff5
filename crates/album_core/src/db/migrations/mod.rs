//! Album schema creation and destructive upgrade.
//!
//! # Responsibility
//! - Create the `albums` table on first open.
//! - Drop and recreate the table when the stored version is older.
//!
//! # Invariants
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - Upgrades never preserve rows; there is no data-migrating path.
//! - A database written by a newer binary is left untouched.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

/// Version written to `PRAGMA user_version` once the schema is in place.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the single table owned by the album store.
pub const ALBUMS_TABLE: &str = "albums";

const CREATE_ALBUMS_SQL: &str = include_str!("0001_albums.sql");
const DROP_ALBUMS_SQL: &str = "DROP TABLE IF EXISTS albums;";

/// Returns the schema version known by this binary.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Brings the connection to [`SCHEMA_VERSION`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    migrate_to(conn, latest_version())
}

fn migrate_to(conn: &mut Connection, latest: u32) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    if current_version == 0 {
        info!("event=schema_create module=db status=start version={latest}");
    } else {
        warn!(
            "event=schema_upgrade module=db status=start from={current_version} to={latest} mode=destructive"
        );
        tx.execute_batch(DROP_ALBUMS_SQL)?;
    }
    tx.execute_batch(CREATE_ALBUMS_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {latest};"))?;
    tx.commit()?;

    info!("event=schema_apply module=db status=ok version={latest}");
    Ok(())
}

/// Reads `PRAGMA user_version` from the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{current_user_version, migrate_to};
    use crate::db::DbError;
    use rusqlite::Connection;

    fn album_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM albums;", [], |row| row.get(0))
            .expect("albums should be countable")
    }

    #[test]
    fn create_is_idempotent_at_same_version() {
        let mut conn = Connection::open_in_memory().expect("in-memory db");
        migrate_to(&mut conn, 1).expect("initial create");
        conn.execute("INSERT INTO albums (artist, name) VALUES ('Queen', 'Jazz');", [])
            .expect("insert");

        migrate_to(&mut conn, 1).expect("second apply");
        assert_eq!(album_count(&conn), 1);
    }

    #[test]
    fn version_bump_drops_and_recreates_table() {
        let mut conn = Connection::open_in_memory().expect("in-memory db");
        migrate_to(&mut conn, 1).expect("initial create");
        conn.execute("INSERT INTO albums (artist, name) VALUES ('Queen', 'Jazz');", [])
            .expect("insert");

        migrate_to(&mut conn, 2).expect("upgrade");
        assert_eq!(album_count(&conn), 0);
        assert_eq!(current_user_version(&conn).expect("version"), 2);
    }

    #[test]
    fn newer_database_is_rejected_untouched() {
        let mut conn = Connection::open_in_memory().expect("in-memory db");
        migrate_to(&mut conn, 3).expect("create at 3");

        let err = migrate_to(&mut conn, 2).expect_err("downgrade should fail");
        assert!(matches!(
            err,
            DbError::UnsupportedSchemaVersion {
                db_version: 3,
                latest_supported: 2
            }
        ));
    }
}
