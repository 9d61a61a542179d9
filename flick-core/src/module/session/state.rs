///! Session state and its transitions
///!
///! The two flows (search, trending) each hold their own request state and
///! list and are only changed through the transition methods below. Every
///! `begin_*` hands out a [`Ticket`]; a `finish_*` with anything but the most
///! recent ticket of its flow is a no-op.

use chrono::{DateTime, Utc};
use flick_common::{Movie, RequestState, TrendingEntry};

use crate::module::catalog::LookupError;
use crate::module::trending::AggregationError;

/// Issuance number of one request within a flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFlow {
    pub state: RequestState,
    pub results: Vec<Movie>,
    latest: Ticket,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendingFlow {
    pub state: RequestState,
    pub entries: Vec<TrendingEntry>,
    latest: Ticket,
}

impl TrendingFlow {
    /// Loaded successfully but the store has nothing ranked yet
    pub fn is_empty(&self) -> bool {
        self.state == RequestState::Success && self.entries.is_empty()
    }
}

/// Immutable snapshot of everything the view renders
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Raw input, updated on every edit
    pub query: String,
    /// Last settled input; the query of the most recently issued lookup
    pub debounced_query: String,
    pub search: SearchFlow,
    pub trending: TrendingFlow,
    pub updated_at: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            query: String::new(),
            debounced_query: String::new(),
            search: SearchFlow::default(),
            trending: TrendingFlow::default(),
            updated_at: Utc::now(),
        }
    }
}

impl SessionState {
    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.touch();
    }

    /// Enter `Loading` for a newly settled query and issue its ticket.
    ///
    /// Results from the previous request stay visible until this one resolves.
    pub fn begin_search(&mut self, debounced_query: &str) -> Ticket {
        let ticket = Ticket(self.search.latest.0 + 1);
        self.search.latest = ticket;
        self.search.state = RequestState::Loading;
        self.debounced_query = debounced_query.to_string();
        self.touch();
        ticket
    }

    /// Apply a lookup outcome. Returns false (state untouched) for a stale ticket.
    pub fn finish_search(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Movie>, LookupError>,
    ) -> bool {
        if ticket != self.search.latest {
            return false;
        }

        match outcome {
            Ok(movies) => {
                self.search.results = movies;
                self.search.state = RequestState::Success;
            }
            Err(e) => {
                self.search.results.clear();
                self.search.state = RequestState::Failed(e.user_message());
            }
        }
        self.touch();
        true
    }

    pub fn begin_trending(&mut self) -> Ticket {
        let ticket = Ticket(self.trending.latest.0 + 1);
        self.trending.latest = ticket;
        self.trending.state = RequestState::Loading;
        self.touch();
        ticket
    }

    pub fn finish_trending(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<TrendingEntry>, AggregationError>,
    ) -> bool {
        if ticket != self.trending.latest {
            return false;
        }

        match outcome {
            Ok(entries) => {
                self.trending.entries = entries;
                self.trending.state = RequestState::Success;
            }
            Err(e) => {
                self.trending.entries.clear();
                self.trending.state = RequestState::Failed(e.user_message());
            }
        }
        self.touch();
        true
    }
}
