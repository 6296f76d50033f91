use serde::Serialize;

/// A performer in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub genre: String,
    pub country: String,
    pub description: String,
}

impl Artist {
    /// First `max_chars` characters of the description, with `...` appended when cut
    pub fn description_preview(&self, max_chars: usize) -> String {
        let mut chars = self.description.chars();
        let preview: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{preview}...")
        } else {
            preview
        }
    }
}

/// Artist fields written by the insert path; the id is generated by the database
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub genre: String,
    pub country: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist_with_description(description: &str) -> Artist {
        Artist {
            id: 1,
            name: "Shakira".into(),
            genre: "Latin Pop".into(),
            country: "Colombia".into(),
            description: description.into(),
        }
    }

    #[test]
    fn test_preview_keeps_short_description() {
        let artist = artist_with_description("Short bio");
        assert_eq!(artist.description_preview(60), "Short bio");
    }

    #[test]
    fn test_preview_truncates_long_description() {
        let artist = artist_with_description("abcdefghij");
        assert_eq!(artist.description_preview(4), "abcd...");
        assert_eq!(artist.description_preview(10), "abcdefghij");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let artist = artist_with_description("Beyoncé Knowles");
        assert_eq!(artist.description_preview(7), "Beyoncé...");
    }
}
