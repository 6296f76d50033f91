use serde::Serialize;
use url::Url;

/// A song. `artist_name` and `album_title` are resolved by joins and stay `None`
/// when the referenced row is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub genre: String,
    /// length in seconds
    pub duration: u32,
    pub url: Option<String>,
    pub album_id: i64,
    pub artist_id: i64,
    pub artist_name: Option<String>,
    pub album_title: Option<String>,
    /// `duration` rendered as `M:SS`
    pub duration_display: String,
}

impl Song {
    /// Url that can be handed to a browser, if the stored one is a valid http(s) url
    pub fn playable_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| is_playable_url(url))
    }
}

#[derive(Debug, Clone)]
pub struct NewSong {
    pub title: String,
    pub genre: String,
    pub duration: u32,
    pub url: Option<String>,
    pub album_id: i64,
    pub artist_id: i64,
}

/// Names resolved for the song detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongDetails {
    pub artist_name: Option<String>,
    pub album_title: Option<String>,
}

/// Formats a number of seconds as `M:SS`. Minutes are not padded.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn is_playable_url(raw: &str) -> bool {
    match Url::parse(raw.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song_with_url(url: Option<&str>) -> Song {
        Song {
            id: 1,
            title: "Thriller".into(),
            genre: "Pop".into(),
            duration: 357,
            url: url.map(str::to_string),
            album_id: 3,
            artist_id: 3,
            artist_name: Some("Michael Jackson".into()),
            album_title: Some("Thriller".into()),
            duration_display: format_duration(357),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(196), "3:16");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(60), "1:00");
        assert_eq!(format_duration(3601), "60:01");
    }

    #[test]
    fn test_playable_url_accepts_http_and_https() {
        assert!(is_playable_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_playable_url("http://example.com/song.mp3"));
    }

    #[test]
    fn test_playable_url_rejects_other_values() {
        assert!(!is_playable_url(""));
        assert!(!is_playable_url("not a url"));
        assert!(!is_playable_url("ftp://example.com/song.mp3"));
        assert!(!is_playable_url("file:///home/user/song.mp3"));
        assert!(!is_playable_url("www.youtube.com/watch?v=abc"));
    }

    #[test]
    fn test_song_playable_url() {
        assert_eq!(
            song_with_url(Some("https://example.com/thriller")).playable_url(),
            Some("https://example.com/thriller")
        );
        assert_eq!(song_with_url(Some("javascript:alert(1)")).playable_url(), None);
        assert_eq!(song_with_url(None).playable_url(), None);
    }
}
