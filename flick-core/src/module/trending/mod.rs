///! Trending aggregator
///!
///! Reads the store's ranked list of popular searches and records each
///! successful search term against it.

pub mod client;
pub mod types;

use async_trait::async_trait;
use flick_common::{Movie, TrendingEntry};

pub use client::TrendingClient;
pub use types::{normalize_term, AggregationError};

/// External store ranking previously searched queries
#[async_trait]
pub trait TrendingStore: Send + Sync {
    /// Current ranked list, most popular first. An empty list is valid.
    async fn fetch_trending(&self) -> Result<Vec<TrendingEntry>, AggregationError>;

    /// Count one search for `query`, snapshotting `top_result` as its representative.
    async fn record_search(&self, query: &str, top_result: &Movie) -> anyhow::Result<()>;
}
