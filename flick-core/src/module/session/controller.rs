///! Search session controller
///!
///! Wires the debouncer to the catalog and trending clients. Each settled
///! query starts a lookup task; lookups are never aborted, but only the one
///! holding the latest ticket may change state. Trending writes run as
///! detached tasks whose result is only logged.

use flick_common::Movie;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::state::{SessionState, Ticket};
use crate::module::catalog::Catalog;
use crate::module::debounce::{DebounceConfig, Debouncer};
use crate::module::trending::TrendingStore;

struct SessionCore {
    state: watch::Sender<SessionState>,
    catalog: Arc<dyn Catalog>,
    trending: Arc<dyn TrendingStore>,
}

impl SessionCore {
    fn start_lookup(self: &Arc<Self>, query: String) {
        let mut ticket = Ticket::default();
        self.state.send_modify(|s| ticket = s.begin_search(&query));
        debug!("Issued lookup {:?} for {:?}", ticket, query);

        let core = self.clone();
        tokio::spawn(async move {
            let outcome = core.catalog.lookup(&query).await;
            if let Err(e) = &outcome {
                warn!("Lookup for {:?} failed: {}", query, e);
            }

            let top_result = match &outcome {
                Ok(movies) if !query.is_empty() => movies.first().cloned(),
                _ => None,
            };

            if !core.state.send_if_modified(|s| s.finish_search(ticket, outcome)) {
                debug!("Discarded stale lookup {:?} for {:?}", ticket, query);
                return;
            }

            if let Some(top_result) = top_result {
                core.record_search(query, top_result);
            }
        });
    }

    fn start_trending(self: &Arc<Self>) {
        let mut ticket = Ticket::default();
        self.state.send_modify(|s| ticket = s.begin_trending());

        let core = self.clone();
        tokio::spawn(async move {
            let outcome = core.trending.fetch_trending().await;
            match &outcome {
                Ok(entries) => info!("Loaded {} trending entries", entries.len()),
                Err(e) => warn!("Trending fetch failed: {}", e),
            }

            if !core.state.send_if_modified(|s| s.finish_trending(ticket, outcome)) {
                debug!("Discarded stale trending load {:?}", ticket);
            }
        });
    }

    /// Fire-and-forget: nothing awaits this task and its failure is only logged.
    fn record_search(&self, query: String, top_result: Movie) {
        let trending = self.trending.clone();
        tokio::spawn(async move {
            match trending.record_search(&query, &top_result).await {
                Ok(()) => debug!("Recorded search {:?}", query),
                Err(e) => warn!("Failed to record search {:?}: {:#}", query, e),
            }
        });
    }
}

async fn drive(core: Arc<SessionCore>, mut settled: mpsc::UnboundedReceiver<String>) {
    while let Some(query) = settled.recv().await {
        core.start_lookup(query);
    }
    debug!("Settled query stream closed");
}

/// A running search session. Dropping it stops the debouncer and the driver;
/// lookups already in flight finish but nothing new is issued.
pub struct SearchSession {
    core: Arc<SessionCore>,
    debouncer: Debouncer,
    driver: JoinHandle<()>,
}

impl SearchSession {
    /// Start a session: issues the initial (empty query) lookup and the one-off
    /// trending load right away. Must be called within a tokio runtime.
    pub fn start(
        catalog: Arc<dyn Catalog>,
        trending: Arc<dyn TrendingStore>,
        config: DebounceConfig,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let core = Arc::new(SessionCore {
            state,
            catalog,
            trending,
        });

        let (settled_tx, settled_rx) = mpsc::unbounded_channel();
        let debouncer = Debouncer::spawn(config, String::new(), settled_tx);

        info!(
            "Starting search session (quiet period {:?})",
            config.quiet_period
        );
        core.start_trending();
        core.start_lookup(String::new());

        let driver = tokio::spawn(drive(core.clone(), settled_rx));

        Self {
            core,
            debouncer,
            driver,
        }
    }

    /// Record a new raw input value; a lookup follows once it settles.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.core.state.send_modify(|s| s.set_query(query.clone()));
        if !self.debouncer.push(query) {
            warn!("Debouncer stopped, query edit ignored");
        }
    }

    /// Re-run the trending load. A load still in flight is superseded.
    pub fn reload_trending(&self) {
        self.core.start_trending();
    }

    pub fn snapshot(&self) -> SessionState {
        self.core.state.borrow().clone()
    }

    /// Receiver that observes every applied transition
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.core.state.subscribe()
    }

    pub fn shutdown(self) {
        info!("Search session shutting down");
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.driver.abort();
    }
}
