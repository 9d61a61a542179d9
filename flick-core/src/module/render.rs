///! Plain-text view of a session snapshot
///!
///! Each flow gets its own loading indicator and error slot.

use flick_common::{Movie, RequestState};

use crate::module::session::SessionState;

fn movie_line(movie: &Movie, image_base_url: &str) -> String {
    let mut line = movie.title.clone();
    if let Some(year) = movie.release_year() {
        line.push_str(&format!(" ({})", year));
    }
    line.push_str(&format!("  * {:.1}", movie.vote_average));
    if let Some(lang) = movie.original_language.as_deref() {
        line.push_str(&format!("  {}", lang.to_uppercase()));
    }
    line.push_str(&format!("  {}", movie.poster_url(image_base_url)));
    line
}

/// Loading indicator or error slot line, if the flow is not showing a list
fn status_line(state: &RequestState) -> Option<String> {
    match state {
        RequestState::Loading => Some("  loading...\n".to_string()),
        RequestState::Failed(reason) => Some(format!("  ! {}\n", reason)),
        RequestState::Idle | RequestState::Success => None,
    }
}

/// Render the trending and search sections of `state`.
pub fn render_session(state: &SessionState, image_base_url: &str) -> String {
    let mut out = String::new();

    out.push_str("Trending Movies\n");
    if let Some(line) = status_line(&state.trending.state) {
        out.push_str(&line);
    } else if state.trending.is_empty() {
        out.push_str("  Nothing trending yet.\n");
    } else {
        for (rank, entry) in state.trending.entries.iter().enumerate() {
            out.push_str(&format!("  {}. {}  {}\n", rank + 1, entry.title, entry.poster()));
        }
    }

    out.push('\n');
    if state.debounced_query.is_empty() {
        out.push_str("All Movies\n");
    } else {
        out.push_str(&format!("All Movies matching \"{}\"\n", state.debounced_query));
    }
    if let Some(line) = status_line(&state.search.state) {
        out.push_str(&line);
    } else if state.search.state == RequestState::Success && state.search.results.is_empty() {
        out.push_str("  No movies found.\n");
    } else {
        for movie in &state.search.results {
            out.push_str(&format!("  {}\n", movie_line(movie, image_base_url)));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::catalog::LookupError;
    use crate::module::trending::AggregationError;
    use crate::test_support::{movie, trending_entry};

    const IMG: &str = "https://image.tmdb.org/t/p/w500";

    #[test]
    fn test_render_loading_both_flows() {
        let mut state = SessionState::default();
        state.begin_trending();
        state.begin_search("");
        let text = render_session(&state, IMG);
        assert_eq!(text.matches("loading...").count(), 2);
        assert!(text.contains("All Movies\n"));
    }

    #[test]
    fn test_render_ranked_trending_and_results() {
        let mut state = SessionState::default();
        let t = state.begin_trending();
        state.finish_trending(
            t,
            Ok(vec![trending_entry("a", "dune", 9), trending_entry("b", "heat", 3)]),
        );
        let s = state.begin_search("dune");
        state.finish_search(s, Ok(vec![movie(438631, "Dune")]));

        let text = render_session(&state, IMG);
        assert!(text.contains("  1. dune  https://img/a.jpg"));
        assert!(text.contains("  2. heat  https://img/b.jpg"));
        assert!(text.contains("All Movies matching \"dune\""));
        assert!(text.contains(
            "  Dune (2021)  * 7.0  EN  https://image.tmdb.org/t/p/w500/438631.jpg"
        ));
    }

    #[test]
    fn test_render_errors_per_flow() {
        let mut state = SessionState::default();
        let t = state.begin_trending();
        state.finish_trending(t, Err(AggregationError::Malformed("eof".into())));
        let s = state.begin_search("batman");
        state.finish_search(s, Err(LookupError::Catalog("Invalid API key".into())));

        let text = render_session(&state, IMG);
        assert!(text.contains("  ! Failed to fetch trending movies."));
        assert!(text.contains("  ! Invalid API key"));
    }

    #[test]
    fn test_render_empty_states() {
        let mut state = SessionState::default();
        let t = state.begin_trending();
        state.finish_trending(t, Ok(Vec::new()));
        let s = state.begin_search("qwzx");
        state.finish_search(s, Ok(Vec::new()));

        let text = render_session(&state, IMG);
        assert!(text.contains("Nothing trending yet."));
        assert!(text.contains("No movies found."));
    }

    #[test]
    fn test_render_full_layout() {
        let mut state = SessionState::default();
        let t = state.begin_trending();
        state.finish_trending(t, Ok(vec![trending_entry("a", "dune", 9)]));
        let s = state.begin_search("dune");
        state.finish_search(s, Ok(vec![movie(438631, "Dune")]));

        let expected = "Trending Movies\n\
                        \x20 1. dune  https://img/a.jpg\n\
                        \n\
                        All Movies matching \"dune\"\n\
                        \x20 Dune (2021)  * 7.0  EN  https://image.tmdb.org/t/p/w500/438631.jpg\n";
        assert_eq!(render_session(&state, IMG), expected);
    }
}
