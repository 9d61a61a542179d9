///! Catalog request routing and error types

use flick_common::Movie;
use serde::Deserialize;
use thiserror::Error;

pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "Failed to fetch movies. Please check your network connection or try again later.";
pub const CATALOG_FAILURE_MESSAGE: &str = "Failed to fetch movies";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// Network failure, non-success status, or an unreadable body
    #[error("catalog transport error: {0}")]
    Transport(String),

    /// The catalog answered but flagged the request as failed
    #[error("catalog error: {0}")]
    Catalog(String),
}

impl LookupError {
    /// Message suitable for the search flow's error slot
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            LookupError::Catalog(message) if !message.trim().is_empty() => message.clone(),
            LookupError::Catalog(_) => CATALOG_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Transport(e.to_string())
    }
}

/// Which catalog endpoint a query is routed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    /// Default ranking, used for the empty query
    Discover,
    Search(String),
}

impl CatalogRequest {
    pub fn for_query(query: &str) -> Self {
        if query.is_empty() {
            CatalogRequest::Discover
        } else {
            CatalogRequest::Search(query.to_string())
        }
    }

    /// Full request URL below `base_url`; the search term is percent-encoded.
    pub fn url(&self, base_url: &str) -> String {
        let base_url = base_url.trim_end_matches('/');
        match self {
            CatalogRequest::Discover => format!("{}/discover/movie?sort_by=popularity.desc", base_url),
            CatalogRequest::Search(query) => {
                format!("{}/search/movie?query={}", base_url, urlencoding::encode(query))
            }
        }
    }
}

/// Raw catalog body.
///
/// Besides TMDB's own `success`/`status_message` pair, the catalog may answer
/// with a `response: false` flag and an `error` message.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogResponse {
    #[serde(default)]
    pub results: Option<Vec<Movie>>,
    #[serde(default, alias = "Response")]
    pub response: Option<serde_json::Value>,
    #[serde(default, alias = "Error")]
    pub error: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_message: Option<String>,
}
