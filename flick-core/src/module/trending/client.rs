///! HTTP client for the document store holding search counts
///!
///! Documents live at `{endpoint}/databases/{db}/collections/{col}/documents`
///! and carry the normalized search term, its count and a snapshot of the
///! top movie for that term.

use anyhow::{Context, Result};
use async_trait::async_trait;
use flick_common::{Movie, TrendingEntry};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use tokio::sync::Mutex;

use super::types::{
    normalize_term, AggregationError, CountUpdate, CreateDocument, DocumentList, SearchRecord,
    UpdateDocument,
};
use super::TrendingStore;
use crate::config::TrendingConfig;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

pub struct TrendingClient {
    client: Client,
    documents_url: String,
    project_id: Option<String>,
    api_key: Option<String>,
    limit: usize,
    /// Used to turn a movie's poster path into the URL stored with the count
    image_base_url: String,
    /// Held across find + write so one term never gets two documents
    write_lock: Mutex<()>,
}

impl TrendingClient {
    pub fn new(config: &TrendingConfig, image_base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("flick/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build trending HTTP client")?;

        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&config.database_id),
            urlencoding::encode(&config.collection_id),
        );

        Ok(Self {
            client,
            documents_url,
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            limit: config.limit,
            image_base_url: image_base_url.to_string(),
            write_lock: Mutex::new(()),
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(project_id) = &self.project_id {
            builder = builder.header(PROJECT_HEADER, project_id);
        }
        if let Some(api_key) = &self.api_key {
            builder = builder.header(KEY_HEADER, api_key);
        }
        builder
    }

    async fn list(&self, params: &str) -> Result<DocumentList, AggregationError> {
        let url = format!("{}?{}", self.documents_url, params);
        let response = self.request(Method::GET, &url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregationError::Transport(format!("HTTP error {}", status)));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| AggregationError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TrendingStore for TrendingClient {
    async fn fetch_trending(&self) -> Result<Vec<TrendingEntry>, AggregationError> {
        let list = self
            .list(&format!("orderDesc=count&limit={}", self.limit))
            .await?;
        tracing::debug!(
            "Fetched {} trending entries ({} total)",
            list.documents.len(),
            list.total
        );
        Ok(list.documents)
    }

    async fn record_search(&self, query: &str, top_result: &Movie) -> Result<()> {
        let term = normalize_term(query);
        if term.is_empty() {
            anyhow::bail!("Refusing to record an empty search term");
        }

        let _write_guard = self.write_lock.lock().await;
        let existing = self
            .list(&format!("searchTerm={}&limit=1", urlencoding::encode(&term)))
            .await
            .with_context(|| format!("Failed to look up search term '{}'", term))?;

        match existing.documents.into_iter().next() {
            Some(doc) => {
                let url = format!("{}/{}", self.documents_url, urlencoding::encode(&doc.id));
                let update = UpdateDocument {
                    data: CountUpdate { count: doc.count + 1 },
                };
                self.request(Method::PATCH, &url)
                    .json(&update)
                    .send()
                    .await?
                    .error_for_status()
                    .with_context(|| format!("Failed to increment count for '{}'", term))?;
                tracing::debug!("Search '{}' counted {} times", term, doc.count + 1);
            }
            None => {
                let create = CreateDocument {
                    document_id: "unique()",
                    data: SearchRecord {
                        search_term: term.clone(),
                        count: 1,
                        movie_id: top_result.id,
                        title: top_result.title.clone(),
                        poster_url: top_result.poster_url(&self.image_base_url),
                    },
                };
                self.request(Method::POST, &self.documents_url)
                    .json(&create)
                    .send()
                    .await?
                    .error_for_status()
                    .with_context(|| format!("Failed to create document for '{}'", term))?;
                tracing::debug!("Search '{}' recorded for the first time", term);
            }
        }

        Ok(())
    }
}
