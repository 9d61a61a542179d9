pub mod types;

pub use types::{Movie, RequestState, TrendingEntry, POSTER_PLACEHOLDER};
