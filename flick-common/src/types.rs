use serde::{Deserialize, Serialize};

/// Poster shown when the catalog has no artwork for a movie
pub const POSTER_PLACEHOLDER: &str = "no-movie.png";

/// A movie record as returned by the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Relative poster path, e.g. "/8b8R8l88Qje9dn9OE8PY05Nxl1X.jpg"
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    /// "YYYY-MM-DD", sometimes an empty string for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub overview: String,
}

impl Movie {
    /// Absolute poster URL below `image_base`, or the placeholder
    pub fn poster_url(&self, image_base: &str) -> String {
        match self.poster_path.as_deref() {
            Some(path) if !path.is_empty() => {
                format!("{}/{}", image_base.trim_end_matches('/'), path.trim_start_matches('/'))
            }
            _ => POSTER_PLACEHOLDER.to_string(),
        }
    }

    /// Four-digit year from the release date, if one is present
    pub fn release_year(&self) -> Option<&str> {
        let date = self.release_date.as_deref()?;
        let year = date.get(..4)?;
        year.chars().all(|c| c.is_ascii_digit()).then_some(year)
    }
}

/// One ranked document from the trending store.
///
/// Rank is the position in the list as delivered by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_url: Option<String>,
}

impl TrendingEntry {
    pub fn poster(&self) -> &str {
        self.poster_url.as_deref().unwrap_or(POSTER_PLACEHOLDER)
    }
}

/// Lifecycle of one request flow (search or trending)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success,
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Human-readable failure reason, if the flow failed
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Loading => "loading",
            RequestState::Success => "success",
            RequestState::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestState::Failed(reason) => write!(f, "failed: {}", reason),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(poster: Option<&str>, release: Option<&str>) -> Movie {
        Movie {
            id: 438631,
            title: "Dune".to_string(),
            poster_path: poster.map(str::to_string),
            popularity: 120.5,
            vote_average: 7.8,
            release_date: release.map(str::to_string),
            original_language: Some("en".to_string()),
            overview: String::new(),
        }
    }

    #[test]
    fn test_poster_url() {
        let m = movie(Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"), None);
        assert_eq!(
            m.poster_url("https://image.tmdb.org/t/p/w500/"),
            "https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"
        );
        assert_eq!(movie(None, None).poster_url("https://x"), POSTER_PLACEHOLDER);
        assert_eq!(movie(Some(""), None).poster_url("https://x"), POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_release_year() {
        assert_eq!(movie(None, Some("2021-09-15")).release_year(), Some("2021"));
        assert_eq!(movie(None, Some("")).release_year(), None);
        assert_eq!(movie(None, Some("TBA")).release_year(), None);
        assert_eq!(movie(None, None).release_year(), None);
    }

    #[test]
    fn test_movie_tolerates_missing_fields() {
        let m: Movie = serde_json::from_str(r#"{"id":7,"title":"Se7en"}"#).unwrap();
        assert_eq!(m.id, 7);
        assert!(m.poster_path.is_none());
        assert_eq!(m.vote_average, 0.0);
    }

    #[test]
    fn test_trending_entry_document_shape() {
        let json = r#"{"$id":"abc","searchTerm":"dune","count":4,"movie_id":438631,"title":"Dune","poster_url":"https://img/dune.jpg"}"#;
        let entry: TrendingEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "abc");
        assert_eq!(entry.search_term, "dune");
        assert_eq!(entry.count, 4);
        assert_eq!(entry.poster(), "https://img/dune.jpg");
    }

    #[test]
    fn test_request_state_display() {
        assert_eq!(RequestState::Loading.to_string(), "loading");
        assert_eq!(
            RequestState::Failed("Invalid API key".to_string()).to_string(),
            "failed: Invalid API key"
        );
        assert_eq!(RequestState::Failed("x".into()).error(), Some("x"));
        assert!(RequestState::Success.error().is_none());
        assert!(RequestState::Loading.is_loading());
    }
}
