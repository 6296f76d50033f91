use serde::Serialize;

/// An album. `artist_name` is only filled by queries that join the artists table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub artist_id: i64,
    pub artist_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAlbum {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub artist_id: i64,
}
