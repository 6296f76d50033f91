use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::{
    config,
    domain::{
        album::{Album, NewAlbum},
        artist::{Artist, NewArtist},
        song::{NewSong, Song, SongDetails},
    },
    storage::{
        db,
        error::StorageError,
        mapper::{self, ALBUM_ALIAS, ARTIST_ALIAS, SONG_ALIAS, qualified},
        query::{Filter, SelectQuery},
        schema::{columns::*, tables::*},
    },
};

/// Filters of the artist list
#[derive(Debug, Clone, Default)]
pub struct ArtistFilters {
    /// substring of the name or the description
    pub search: Filter,
    pub genre: Filter,
    pub country: Filter,
}

/// Filters of the album list
#[derive(Debug, Clone, Default)]
pub struct AlbumFilters {
    /// substring of the album title or the artist name
    pub search: Filter,
    pub artist: Filter,
    pub genre: Filter,
}

/// Filters of the song list
#[derive(Debug, Clone, Default)]
pub struct SongFilters {
    /// substring of the song title
    pub search: Filter,
    pub artist: Filter,
    pub album: Filter,
    pub genre: Filter,
}

/// Columns whose values feed the filter selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctColumn {
    ArtistName,
    ArtistGenre,
    ArtistCountry,
    AlbumGenre,
    AlbumTitle,
    SongGenre,
}

impl DistinctColumn {
    pub fn table_and_column(self) -> (&'static str, &'static str) {
        match self {
            DistinctColumn::ArtistName => (ARTISTS, NAME),
            DistinctColumn::ArtistGenre => (ARTISTS, GENRE),
            DistinctColumn::ArtistCountry => (ARTISTS, COUNTRY),
            DistinctColumn::AlbumGenre => (ALBUMS, GENRE),
            DistinctColumn::AlbumTitle => (ALBUMS, TITLE),
            DistinctColumn::SongGenre => (SONGS, GENRE),
        }
    }
}

/// Read access to the catalog plus the insert path
pub struct Catalog {
    pub(crate) db: Connection,
}

impl Catalog {
    /// opens the configured database, creating and seeding it when needed
    pub fn new(db_config: &config::Database) -> Result<Self, StorageError> {
        let db = db::open(db_config)?;
        Ok(Self::from_existing_conn(db))
    }

    /// wraps a connection whose schema is already in place
    pub fn from_existing_conn(db: Connection) -> Self {
        Self { db }
    }

    fn fetch<T>(
        &self,
        query: &SelectQuery,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>, StorageError> {
        let sql = query.sql();
        log::debug!("query: {sql}");

        let mut stmt = self.db.prepare(&sql)?;
        let params = query.params();
        let rows = stmt
            .query_map(params.as_slice(), map)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Artists ordered by name
    pub fn list_artists(&self, filters: &ArtistFilters) -> Result<Vec<Artist>, StorageError> {
        let ar = |column: &str| qualified(ARTIST_ALIAS, column);
        let query = SelectQuery::new(mapper::artist_select())
            .contains_any(&[ar(NAME), ar(DESCRIPTION)], &filters.search)
            .equals(&ar(GENRE), &filters.genre)
            .equals(&ar(COUNTRY), &filters.country)
            .order_by(&ar(NAME))
            .order_by(&ar(ARTIST_ID));
        self.fetch(&query, mapper::artist_from_row)
    }

    /// Albums ordered by title, with the artist name resolved
    pub fn list_albums(&self, filters: &AlbumFilters) -> Result<Vec<Album>, StorageError> {
        let al = |column: &str| qualified(ALBUM_ALIAS, column);
        let ar = |column: &str| qualified(ARTIST_ALIAS, column);
        let query = SelectQuery::new(mapper::album_select())
            .contains_any(&[al(TITLE), ar(NAME)], &filters.search)
            .equals(&ar(NAME), &filters.artist)
            .equals(&al(GENRE), &filters.genre)
            .order_by(&al(TITLE))
            .order_by(&al(ALBUM_ID));
        self.fetch(&query, mapper::album_from_row)
    }

    /// Songs ordered by title, with artist name and album title resolved
    pub fn list_songs(&self, filters: &SongFilters) -> Result<Vec<Song>, StorageError> {
        let s = |column: &str| qualified(SONG_ALIAS, column);
        let query = SelectQuery::new(mapper::song_select())
            .contains_any(&[s(TITLE)], &filters.search)
            .equals(&qualified(ARTIST_ALIAS, NAME), &filters.artist)
            .equals(&qualified(ALBUM_ALIAS, TITLE), &filters.album)
            .equals(&s(GENRE), &filters.genre)
            .order_by(&s(TITLE))
            .order_by(&s(SONG_ID));
        self.fetch(&query, mapper::song_from_row)
    }

    /// Sorted unique non-empty values of a column, read fresh on every call
    pub fn distinct_values(&self, column: DistinctColumn) -> Result<Vec<String>, StorageError> {
        let (table, column) = column.table_and_column();
        let mut stmt = self.db.prepare(&format!(
            "SELECT DISTINCT {column} FROM {table}
             WHERE {column} IS NOT NULL AND TRIM({column}) <> ''
             ORDER BY {column}"
        ))?;

        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(values)
    }

    /// Artist name and album title of a song; `None` if there is no such song
    pub fn song_details(&self, song_id: i64) -> Result<Option<SongDetails>, StorageError> {
        let details = self
            .db
            .query_row(
                &format!(
                    "{} WHERE {SONG_ALIAS}.{SONG_ID} = ?1",
                    mapper::song_details_select()
                ),
                params![song_id],
                mapper::song_details_from_row,
            )
            .optional()?;
        Ok(details)
    }

    pub fn get_artist(&self, artist_id: i64) -> Result<Option<Artist>, StorageError> {
        let artist = self
            .db
            .query_row(
                &format!(
                    "{} WHERE {ARTIST_ALIAS}.{ARTIST_ID} = ?1",
                    mapper::artist_select()
                ),
                params![artist_id],
                mapper::artist_from_row,
            )
            .optional()?;
        Ok(artist)
    }

    pub fn get_album(&self, album_id: i64) -> Result<Option<Album>, StorageError> {
        let album = self
            .db
            .query_row(
                &format!(
                    "{} WHERE {ALBUM_ALIAS}.{ALBUM_ID} = ?1",
                    mapper::album_select()
                ),
                params![album_id],
                mapper::album_from_row,
            )
            .optional()?;
        Ok(album)
    }

    pub fn get_song(&self, song_id: i64) -> Result<Option<Song>, StorageError> {
        let song = self
            .db
            .query_row(
                &format!(
                    "{} WHERE {SONG_ALIAS}.{SONG_ID} = ?1",
                    mapper::song_select()
                ),
                params![song_id],
                mapper::song_from_row,
            )
            .optional()?;
        Ok(song)
    }

    pub fn insert_artist(&self, artist: &NewArtist) -> Result<i64, StorageError> {
        Ok(insert_artist(&self.db, artist)?)
    }

    pub fn insert_album(&self, album: &NewAlbum) -> Result<i64, StorageError> {
        Ok(insert_album(&self.db, album)?)
    }

    pub fn insert_song(&self, song: &NewSong) -> Result<i64, StorageError> {
        Ok(insert_song(&self.db, song)?)
    }
}

/// Inserts an artist and returns its generated id
pub fn insert_artist(conn: &Connection, artist: &NewArtist) -> Result<i64, rusqlite::Error> {
    conn.execute(
        &format!(
            "INSERT INTO {ARTISTS} ({NAME}, {GENRE}, {COUNTRY}, {DESCRIPTION}) \
             VALUES (?1, ?2, ?3, ?4)"
        ),
        params![artist.name, artist.genre, artist.country, artist.description],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Inserts an album and returns its generated id. The artist reference is not checked.
pub fn insert_album(conn: &Connection, album: &NewAlbum) -> Result<i64, rusqlite::Error> {
    conn.execute(
        &format!(
            "INSERT INTO {ALBUMS} ({TITLE}, {ARTIST_ID}, {YEAR}, {GENRE}) \
             VALUES (?1, ?2, ?3, ?4)"
        ),
        params![album.title, album.artist_id, album.year, album.genre],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Inserts a song and returns its generated id. Album and artist references are not checked.
pub fn insert_song(conn: &Connection, song: &NewSong) -> Result<i64, rusqlite::Error> {
    conn.execute(
        &format!(
            "INSERT INTO {SONGS} ({TITLE}, {ALBUM_ID}, {ARTIST_ID}, {GENRE}, {DURATION}, {URL}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        ),
        params![
            song.title,
            song.album_id,
            song.artist_id,
            song.genre,
            song.duration,
            song.url
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
