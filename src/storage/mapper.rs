//! Row to value object mapping. Each `*_select` statement fixes the column
//! order its mapping function reads.

use rusqlite::Row;

use crate::{
    domain::{
        album::Album,
        artist::Artist,
        song::{Song, SongDetails, format_duration},
    },
    storage::schema::{columns::*, tables::*},
};

/// Table aliases used by the select statements below
pub const ARTIST_ALIAS: &str = "ar";
pub const ALBUM_ALIAS: &str = "al";
pub const SONG_ALIAS: &str = "s";

/// `alias.column`
pub fn qualified(alias: &str, column: &str) -> String {
    format!("{alias}.{column}")
}

pub fn artist_select() -> String {
    let ar = ARTIST_ALIAS;
    format!(
        "SELECT {ar}.{ARTIST_ID}, {ar}.{NAME}, {ar}.{GENRE}, {ar}.{COUNTRY}, {ar}.{DESCRIPTION} \
         FROM {ARTISTS} {ar}"
    )
}

pub fn album_select() -> String {
    let (al, ar) = (ALBUM_ALIAS, ARTIST_ALIAS);
    format!(
        "SELECT {al}.{ALBUM_ID}, {al}.{TITLE}, {al}.{YEAR}, {al}.{GENRE}, \
         {al}.{ARTIST_ID}, {ar}.{NAME} \
         FROM {ALBUMS} {al} \
         LEFT JOIN {ARTISTS} {ar} ON {ar}.{ARTIST_ID} = {al}.{ARTIST_ID}"
    )
}

fn song_joins() -> String {
    let (s, al, ar) = (SONG_ALIAS, ALBUM_ALIAS, ARTIST_ALIAS);
    format!(
        "FROM {SONGS} {s} \
         LEFT JOIN {ARTISTS} {ar} ON {ar}.{ARTIST_ID} = {s}.{ARTIST_ID} \
         LEFT JOIN {ALBUMS} {al} ON {al}.{ALBUM_ID} = {s}.{ALBUM_ID}"
    )
}

pub fn song_select() -> String {
    let (s, al, ar) = (SONG_ALIAS, ALBUM_ALIAS, ARTIST_ALIAS);
    format!(
        "SELECT {s}.{SONG_ID}, {s}.{TITLE}, {s}.{GENRE}, {s}.{DURATION}, {s}.{URL}, \
         {s}.{ALBUM_ID}, {s}.{ARTIST_ID}, {ar}.{NAME}, {al}.{TITLE} {}",
        song_joins()
    )
}

pub fn song_details_select() -> String {
    let (al, ar) = (ALBUM_ALIAS, ARTIST_ALIAS);
    format!("SELECT {ar}.{NAME}, {al}.{TITLE} {}", song_joins())
}

pub fn artist_from_row(row: &Row<'_>) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        genre: row.get(2)?,
        country: row.get(3)?,
        description: row.get(4)?,
    })
}

pub fn album_from_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get(0)?,
        title: row.get(1)?,
        year: row.get(2)?,
        genre: row.get(3)?,
        artist_id: row.get(4)?,
        artist_name: row.get(5)?,
    })
}

pub fn song_from_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    let duration: u32 = row.get(3)?;
    let url: Option<String> = row.get(4)?;
    Ok(Song {
        id: row.get(0)?,
        title: row.get(1)?,
        genre: row.get(2)?,
        duration,
        url: url.filter(|url| !url.trim().is_empty()),
        album_id: row.get(5)?,
        artist_id: row.get(6)?,
        artist_name: row.get(7)?,
        album_title: row.get(8)?,
        duration_display: format_duration(duration),
    })
}

pub fn song_details_from_row(row: &Row<'_>) -> rusqlite::Result<SongDetails> {
    Ok(SongDetails {
        artist_name: row.get(0)?,
        album_title: row.get(1)?,
    })
}
