///! HTTP client for the TMDB-style movie catalog

use anyhow::{Context, Result};
use async_trait::async_trait;
use flick_common::Movie;
use reqwest::Client;
use reqwest::header::ACCEPT;

use super::parser::parse_catalog_body;
use super::types::{CatalogRequest, LookupError};
use super::Catalog;
use crate::config::CatalogConfig;

pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Build a client from config. Fails when no API key is configured.
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("flick/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build catalog HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn lookup(&self, query: &str) -> Result<Vec<Movie>, LookupError> {
        let request = CatalogRequest::for_query(query);
        let url = request.url(&self.base_url);
        tracing::debug!("Catalog lookup {:?}", request);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!("HTTP error {}", status)));
        }

        let body = response.text().await?;
        let movies = parse_catalog_body(&body)?;
        tracing::debug!("Catalog returned {} movies for {:?}", movies.len(), query);

        Ok(movies)
    }
}
