///! Remote movie catalog
///!
///! Routes a query to the catalog's search or discover endpoint and
///! normalizes the JSON body into a list of movies.

pub mod client;
pub mod parser;
pub mod types;

use async_trait::async_trait;
use flick_common::Movie;

pub use client::TmdbClient;
pub use types::{CatalogRequest, LookupError};

/// A movie catalog that can be queried by free text
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search for `query`, or fetch the default discovery ranking when it is empty.
    ///
    /// An empty result list is a success.
    async fn lookup(&self, query: &str) -> Result<Vec<Movie>, LookupError>;
}
