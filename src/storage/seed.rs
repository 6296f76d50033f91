//! Demonstration rows inserted into empty tables.
//!
//! Rows are inserted in declaration order into empty tables, so the generated
//! ids are 1, 2, 3... and the positional references below line up.

use rusqlite::Connection;

use crate::{
    domain::{album::NewAlbum, artist::NewArtist, song::NewSong},
    storage::{
        operations::{insert_album, insert_artist, insert_song},
        schema::tables,
    },
};

/// (name, genre, country, description)
const SEED_ARTISTS: &[(&str, &str, &str, &str)] = &[
    (
        "Shakira",
        "Latin Pop",
        "Colombia",
        "Colombian singer and songwriter known for blending Latin, rock and Arabic influences.",
    ),
    (
        "Dua Lipa",
        "Pop",
        "United Kingdom",
        "English singer whose disco-inspired pop made her one of the best-selling artists of her generation.",
    ),
    (
        "Michael Jackson",
        "Pop",
        "United States",
        "The King of Pop, whose recordings and performances reshaped popular music and music video.",
    ),
    (
        "Bad Bunny",
        "Reggaeton",
        "Puerto Rico",
        "Puerto Rican rapper and singer at the forefront of Latin trap and reggaeton.",
    ),
    (
        "Beyoncé",
        "R&B",
        "United States",
        "American singer, songwriter and performer celebrated for her vocals and visual albums.",
    ),
];

/// (title, artist position, year, genre)
const SEED_ALBUMS: &[(&str, i64, i32, &str)] = &[
    ("El Dorado", 1, 2017, "Latin Pop"),
    ("Future Nostalgia", 2, 2020, "Pop"),
    ("Thriller", 3, 1982, "Pop/R&B"),
    ("Un Verano Sin Ti", 4, 2022, "Reggaeton"),
    ("Lemonade", 5, 2016, "Pop/R&B"),
];

/// (title, album position, artist position, genre, seconds, url)
const SEED_SONGS: &[(&str, i64, i64, &str, u32, &str)] = &[
    (
        "Chantaje",
        1,
        1,
        "Latin Pop",
        196,
        "https://www.youtube.com/results?search_query=shakira+chantaje",
    ),
    (
        "Levitating",
        2,
        2,
        "Pop",
        203,
        "https://www.youtube.com/results?search_query=dua+lipa+levitating",
    ),
    (
        "Thriller",
        3,
        3,
        "Pop",
        357,
        "https://www.youtube.com/results?search_query=michael+jackson+thriller",
    ),
    ("Billie Jean", 3, 3, "Pop", 294, ""),
    (
        "Tití Me Preguntó",
        4,
        4,
        "Reggaeton",
        243,
        "https://www.youtube.com/results?search_query=bad+bunny+titi+me+pregunto",
    ),
    ("Formation", 5, 5, "R&B", 206, ""),
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub artists: usize,
    pub albums: usize,
    pub songs: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.artists == 0 && self.albums == 0 && self.songs == 0
    }
}

fn is_empty(conn: &Connection, table: &str) -> Result<bool, rusqlite::Error> {
    conn.query_row(&format!("SELECT NOT EXISTS (SELECT 1 FROM {table})"), [], |row| {
        row.get(0)
    })
}

/// Seeds each table that currently has no rows
pub fn seed_if_empty(conn: &Connection) -> Result<SeedReport, rusqlite::Error> {
    let mut report = SeedReport::default();

    if is_empty(conn, tables::ARTISTS)? {
        for (name, genre, country, description) in SEED_ARTISTS {
            let artist = NewArtist {
                name: name.to_string(),
                genre: genre.to_string(),
                country: country.to_string(),
                description: description.to_string(),
            };
            insert_artist(conn, &artist)?;
            report.artists += 1;
        }
    }

    if is_empty(conn, tables::ALBUMS)? {
        for (title, artist_id, year, genre) in SEED_ALBUMS {
            let album = NewAlbum {
                title: title.to_string(),
                year: *year,
                genre: genre.to_string(),
                artist_id: *artist_id,
            };
            insert_album(conn, &album)?;
            report.albums += 1;
        }
    }

    if is_empty(conn, tables::SONGS)? {
        for (title, album_id, artist_id, genre, duration, url) in SEED_SONGS {
            let song = NewSong {
                title: title.to_string(),
                genre: genre.to_string(),
                duration: *duration,
                url: Some(url.to_string()).filter(|url| !url.is_empty()),
                album_id: *album_id,
                artist_id: *artist_id,
            };
            insert_song(conn, &song)?;
            report.songs += 1;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;
    use crate::storage::schema;

    #[test]
    fn test_seed_only_fills_empty_tables() -> anyhow::Result<()> {
        let conn = Connection::open_in_memory()?;
        schema::init(&conn)?;

        let first = seed_if_empty(&conn)?;
        assert_eq!(
            first,
            SeedReport {
                artists: SEED_ARTISTS.len(),
                albums: SEED_ALBUMS.len(),
                songs: SEED_SONGS.len(),
            }
        );

        let second = seed_if_empty(&conn)?;
        assert!(second.is_empty());
        Ok(())
    }

    #[test]
    fn test_seed_references_resolve() -> anyhow::Result<()> {
        let conn = Connection::open_in_memory()?;
        schema::init(&conn)?;
        seed_if_empty(&conn)?;

        let orphans: i64 = conn.query_row(
            "SELECT COUNT(*) FROM songs s
             LEFT JOIN albums al ON al.album_id = s.album_id
             LEFT JOIN artists ar ON ar.artist_id = s.artist_id
             WHERE al.album_id IS NULL OR ar.artist_id IS NULL OR al.artist_id <> s.artist_id",
            [],
            |row| row.get(0),
        )?;
        assert_eq!(orphans, 0);
        Ok(())
    }
}
