use rusqlite::Connection;

use crate::storage::{error::StorageError, seed};

/// Version stored in `PRAGMA user_version` once the schema is in place
pub const SCHEMA_VERSION: i64 = 1;

pub mod tables {
    pub const ARTISTS: &str = "artists";
    pub const ALBUMS: &str = "albums";
    pub const SONGS: &str = "songs";

    pub const ALL_TABLES: &[&str] = &[ARTISTS, ALBUMS, SONGS];
}

pub mod columns {
    pub const ARTIST_ID: &str = "artist_id";
    pub const ALBUM_ID: &str = "album_id";
    pub const SONG_ID: &str = "song_id";
    pub const NAME: &str = "name";
    pub const TITLE: &str = "title";
    pub const GENRE: &str = "genre";
    pub const COUNTRY: &str = "country";
    pub const DESCRIPTION: &str = "description";
    pub const YEAR: &str = "year";
    pub const DURATION: &str = "duration";
    pub const URL: &str = "url";
}

pub use columns::*;
pub use tables::*;

// artist_id / album_id references are not declared as foreign keys
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS artists (
    artist_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    genre TEXT NOT NULL DEFAULT '',
    country TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS albums (
    album_id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    artist_id INTEGER NOT NULL,
    year INTEGER NOT NULL,
    genre TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS songs (
    song_id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    album_id INTEGER NOT NULL,
    artist_id INTEGER NOT NULL,
    genre TEXT NOT NULL DEFAULT '',
    duration INTEGER NOT NULL DEFAULT 0 CHECK (duration >= 0),
    url TEXT
);
"#;

/// Creates the tables if needed
pub fn init(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA)
}

pub fn stored_version(conn: &Connection) -> Result<i64, rusqlite::Error> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Makes the catalog usable: runs `upgrade` when the stored version is older,
/// otherwise tops up any table that is empty. A newer stored version is left as is.
///
/// Safe to call any number of times; seed rows are never duplicated.
pub fn open(conn: &mut Connection) -> Result<(), StorageError> {
    let stored = stored_version(conn).map_err(StorageError::unavailable)?;
    if stored < SCHEMA_VERSION {
        return upgrade(conn, stored, SCHEMA_VERSION);
    }
    if stored > SCHEMA_VERSION {
        log::warn!(
            "catalog schema v{stored} is newer than supported v{SCHEMA_VERSION}, opening as is"
        );
    }

    init(conn).map_err(StorageError::unavailable)?;
    seed_empty_tables(conn)
}

/// Additive upgrade: existing rows are kept, missing tables are created and
/// empty tables are seeded.
pub fn upgrade(
    conn: &mut Connection,
    old_version: i64,
    new_version: i64,
) -> Result<(), StorageError> {
    if old_version == 0 {
        log::info!("creating catalog schema v{new_version}");
    } else {
        log::info!("upgrading catalog schema v{old_version} -> v{new_version}");
    }

    init(conn).map_err(StorageError::unavailable)?;
    seed_empty_tables(conn)?;
    conn.pragma_update(None, "user_version", new_version)
        .map_err(StorageError::unavailable)
}

fn seed_empty_tables(conn: &mut Connection) -> Result<(), StorageError> {
    let tx = conn.transaction().map_err(StorageError::unavailable)?;
    let report = seed::seed_if_empty(&tx).map_err(StorageError::unavailable)?;
    tx.commit().map_err(StorageError::unavailable)?;

    if !report.is_empty() {
        log::info!(
            "seeded {} artists, {} albums, {} songs",
            report.artists,
            report.albums,
            report.songs
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_open_creates_tables_and_sets_version() -> anyhow::Result<()> {
        let mut conn = Connection::open_in_memory()?;
        assert_eq!(stored_version(&conn)?, 0);

        open(&mut conn)?;

        let tables = table_names(&conn);
        for table in ALL_TABLES {
            assert!(tables.contains(&table.to_string()));
        }
        assert_eq!(stored_version(&conn)?, SCHEMA_VERSION);
        Ok(())
    }

    #[test]
    fn test_open_twice_does_not_duplicate_seed() -> anyhow::Result<()> {
        let mut conn = Connection::open_in_memory()?;
        open(&mut conn)?;
        let first = ALL_TABLES.iter().map(|t| count(&conn, t)).collect::<Vec<_>>();

        open(&mut conn)?;
        upgrade(&mut conn, SCHEMA_VERSION, SCHEMA_VERSION)?;
        let second = ALL_TABLES.iter().map(|t| count(&conn, t)).collect::<Vec<_>>();

        assert_eq!(first, second);
        assert!(first.iter().all(|&n| n >= 5));
        Ok(())
    }

    #[test]
    fn test_upgrade_keeps_existing_rows_and_tops_up_empty_tables() -> anyhow::Result<()> {
        let mut conn = Connection::open_in_memory()?;
        open(&mut conn)?;

        conn.execute(
            &format!(
                "INSERT INTO {ARTISTS} ({NAME}, {GENRE}, {COUNTRY}, {DESCRIPTION}) \
                 VALUES (?1, ?2, ?3, ?4)"
            ),
            ["Rosalía", "Flamenco Pop", "Spain", "Catalan singer"],
        )?;
        let artists_before = count(&conn, ARTISTS);
        conn.execute(&format!("DELETE FROM {SONGS}"), [])?;
        conn.pragma_update(None, "user_version", 0)?;

        open(&mut conn)?;

        assert_eq!(count(&conn, ARTISTS), artists_before);
        assert!(count(&conn, SONGS) >= 5);
        assert_eq!(stored_version(&conn)?, SCHEMA_VERSION);
        Ok(())
    }

    #[test]
    fn test_open_keeps_newer_schema_version() -> anyhow::Result<()> {
        let mut conn = Connection::open_in_memory()?;
        open(&mut conn)?;
        let artists_before = count(&conn, ARTISTS);
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)?;

        open(&mut conn)?;

        assert_eq!(stored_version(&conn)?, SCHEMA_VERSION + 1);
        assert_eq!(count(&conn, ARTISTS), artists_before);
        Ok(())
    }

    #[test]
    fn test_open_recreates_dropped_table() -> anyhow::Result<()> {
        let mut conn = Connection::open_in_memory()?;
        open(&mut conn)?;
        conn.execute_batch(&format!("DROP TABLE {ALBUMS}"))?;

        open(&mut conn)?;

        assert!(table_names(&conn).contains(&ALBUMS.to_string()));
        assert!(count(&conn, ALBUMS) >= 5);
        Ok(())
    }

    #[test]
    fn test_negative_duration_is_rejected() -> anyhow::Result<()> {
        let conn = Connection::open_in_memory()?;
        init(&conn)?;

        let result = conn.execute(
            &format!(
                "INSERT INTO {SONGS} ({TITLE}, {ALBUM_ID}, {ARTIST_ID}, {DURATION}) \
                 VALUES ('x', 1, 1, -5)"
            ),
            [],
        );
        assert!(result.is_err());
        Ok(())
    }
}
