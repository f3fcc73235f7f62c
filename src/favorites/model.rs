use serde::{Deserialize, Serialize};

/// Poster value the catalog uses when it has no image.
pub const NO_POSTER: &str = "N/A";

/// One catalog entry, as returned by the search API and stored as a favorite.
///
/// The field names on the wire follow the upstream catalog, so a search
/// result can be posted back unchanged. Only the id is required; missing
/// fields decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster_url: String,
}

impl MovieRecord {
    pub fn new(id: &str, title: &str, year: &str, poster_url: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            poster_url: poster_url.to_string(),
        }
    }

    pub fn has_poster(&self) -> bool {
        !self.poster_url.is_empty() && self.poster_url != NO_POSTER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let json = r#"{"imdbID":"tt0468569","Title":"The Dark Knight","Year":"2008","Poster":"N/A","Type":"movie"}"#;
        let movie: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, "tt0468569");
        assert_eq!(movie.title, "The Dark Knight");
        assert_eq!(movie.year, "2008");
        assert!(!movie.has_poster());

        let out = serde_json::to_value(&movie).unwrap();
        assert_eq!(out["imdbID"], "tt0468569");
        assert_eq!(out["Poster"], "N/A");
        assert!(out.get("Type").is_none());
    }

    #[test]
    fn test_only_id_is_required() {
        let movie: MovieRecord = serde_json::from_str(r#"{"imdbID":"tt1","Title":"A"}"#).unwrap();
        assert_eq!(movie, MovieRecord::new("tt1", "A", "", ""));
        assert!(!movie.has_poster());

        assert!(serde_json::from_str::<MovieRecord>(r#"{"Title":"A"}"#).is_err());
    }

    #[test]
    fn test_year_is_not_parsed() {
        let movie = MovieRecord::new("tt0903747", "Breaking Bad", "2008–2013", "https://example.com/p.jpg");
        assert_eq!(movie.year, "2008–2013");
        assert!(movie.has_poster());
    }
}
