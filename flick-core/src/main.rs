use flick_core::config;
use flick_core::logging;
use flick_core::module::catalog::TmdbClient;
use flick_core::module::debounce::DebounceConfig;
use flick_core::module::render::render_session;
use flick_core::module::session::SearchSession;
use flick_core::module::trending::TrendingClient;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = config::read_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    let _logging_guard = logging::init_logging(&config.log, "flick")?;
    tracing::info!("Flick starting (catalog: {})", config.catalog.base_url);

    let catalog = Arc::new(TmdbClient::new(&config.catalog)?);
    let trending = Arc::new(TrendingClient::new(
        &config.trending,
        &config.catalog.image_base_url,
    )?);

    let session = SearchSession::start(
        catalog,
        trending,
        DebounceConfig::from(&config.session),
    );
    let mut updates = session.subscribe();

    // Every stdin line replaces the query; an empty line returns to discovery
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let image_base_url = config.catalog.image_base_url.as_str();

    println!("{}", render_session(&session.snapshot(), image_base_url));

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line.context("Failed to read query from stdin")? {
                    Some(query) => session.set_query(query),
                    None => {
                        tracing::info!("Input closed, press Ctrl+C to exit");
                        stdin_open = false;
                    }
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                println!("{}", render_session(&state, image_base_url));
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    session.shutdown();
    Ok(())
}
