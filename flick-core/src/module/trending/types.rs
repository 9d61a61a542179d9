///! Trending store document shapes and errors

use flick_common::TrendingEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TRENDING_FAILURE_MESSAGE: &str = "Failed to fetch trending movies.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("trending store transport error: {0}")]
    Transport(String),

    #[error("malformed trending document list: {0}")]
    Malformed(String),
}

impl AggregationError {
    pub fn user_message(&self) -> String {
        TRENDING_FAILURE_MESSAGE.to_string()
    }
}

impl From<reqwest::Error> for AggregationError {
    fn from(e: reqwest::Error) -> Self {
        AggregationError::Transport(e.to_string())
    }
}

/// Response of a document list call
#[derive(Debug, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub documents: Vec<TrendingEntry>,
}

/// Fields written for a new search term
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRecord {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    pub title: String,
    pub poster_url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateDocument {
    #[serde(rename = "documentId")]
    pub document_id: &'static str,
    pub data: SearchRecord,
}

#[derive(Debug, Serialize)]
pub struct CountUpdate {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct UpdateDocument {
    pub data: CountUpdate,
}

/// Key under which a search is counted: trimmed, lowercased, single-spaced
pub fn normalize_term(query: &str) -> String {
    query
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
