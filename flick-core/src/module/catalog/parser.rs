///! Catalog response parser

use flick_common::Movie;

use super::types::{CatalogResponse, LookupError};

fn is_false_flag(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(flag) => !flag,
        serde_json::Value::String(flag) => flag.eq_ignore_ascii_case("false"),
        _ => false,
    }
}

/// Parse a successful-status catalog body into its result list.
///
/// A failure flag in the body becomes [`LookupError::Catalog`]; a body that is
/// not catalog JSON at all is treated as a transport failure.
pub fn parse_catalog_body(body: &str) -> Result<Vec<Movie>, LookupError> {
    let response: CatalogResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Transport(format!("invalid catalog body: {}", e)))?;

    if response.response.as_ref().is_some_and(is_false_flag) {
        return Err(LookupError::Catalog(response.error.unwrap_or_default()));
    }

    if response.success == Some(false) {
        return Err(LookupError::Catalog(
            response.status_message.or(response.error).unwrap_or_default(),
        ));
    }

    Ok(response.results.unwrap_or_default())
}
