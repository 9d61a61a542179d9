use async_trait::async_trait;
use axum::Router;
use flick_common::{Movie, TrendingEntry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::module::catalog::{Catalog, LookupError};
use crate::module::trending::{AggregationError, TrendingStore};

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn spawn_mock(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn movie(id: u64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: Some(format!("/{}.jpg", id)),
        popularity: 10.0,
        vote_average: 7.0,
        release_date: Some("2021-09-15".to_string()),
        original_language: Some("en".to_string()),
        overview: String::new(),
    }
}

pub fn trending_entry(id: &str, term: &str, count: u64) -> TrendingEntry {
    TrendingEntry {
        id: id.to_string(),
        search_term: term.to_string(),
        count,
        movie_id: Some(1),
        title: term.to_string(),
        poster_url: Some(format!("https://img/{}.jpg", id)),
    }
}

/// Catalog whose answers are scripted per query, with an optional delay.
#[derive(Clone, Default)]
pub struct FakeCatalog {
    responses: Arc<Mutex<HashMap<String, (Duration, Result<Vec<Movie>, LookupError>)>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeCatalog {
    pub fn respond(&self, query: &str, delay: Duration, outcome: Result<Vec<Movie>, LookupError>) {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), (delay, outcome));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn lookup(&self, query: &str) -> Result<Vec<Movie>, LookupError> {
        self.calls.lock().unwrap().push(query.to_string());
        let scripted = self.responses.lock().unwrap().get(query).cloned();
        match scripted {
            Some((delay, outcome)) => {
                tokio::time::sleep(delay).await;
                outcome
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Trending store recording every call in memory.
#[derive(Clone)]
pub struct FakeTrending {
    entries: Arc<Mutex<Result<Vec<TrendingEntry>, AggregationError>>>,
    fail_writes: bool,
    write_delay: Duration,
    pub fetches: Arc<Mutex<usize>>,
    pub writes: Arc<Mutex<Vec<(String, Movie)>>>,
}

impl Default for FakeTrending {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Ok(Vec::new()))),
            fail_writes: false,
            write_delay: Duration::ZERO,
            fetches: Arc::default(),
            writes: Arc::default(),
        }
    }
}

impl FakeTrending {
    pub fn with_entries(entries: Result<Vec<TrendingEntry>, AggregationError>) -> Self {
        let fake = Self::default();
        *fake.entries.lock().unwrap() = entries;
        fake
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn slow_writes(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub fn set_entries(&self, entries: Result<Vec<TrendingEntry>, AggregationError>) {
        *self.entries.lock().unwrap() = entries;
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    pub fn writes(&self) -> Vec<(String, Movie)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrendingStore for FakeTrending {
    async fn fetch_trending(&self) -> Result<Vec<TrendingEntry>, AggregationError> {
        *self.fetches.lock().unwrap() += 1;
        self.entries.lock().unwrap().clone()
    }

    async fn record_search(&self, query: &str, top_result: &Movie) -> anyhow::Result<()> {
        self.writes
            .lock()
            .unwrap()
            .push((query.to_string(), top_result.clone()));
        tokio::time::sleep(self.write_delay).await;
        if self.fail_writes {
            anyhow::bail!("trending store is read-only");
        }
        Ok(())
    }
}
