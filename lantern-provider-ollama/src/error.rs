//! Internal error helpers for mapping HTTP/reqwest errors to [`ProviderError`].

use lantern_types::ProviderError;

/// Map a non-success HTTP status (from the Ollama API) to a [`ProviderError`].
///
/// Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md>
pub(crate) fn map_http_status(status: u16, body: &str) -> ProviderError {
    let body = body.trim().to_string();
    match status {
        404 => ProviderError::ModelNotFound(body),
        500..=599 => ProviderError::ServiceUnavailable { status, body },
        _ => ProviderError::Http { status, body },
    }
}

/// Map a [`reqwest::Error`] to a [`ProviderError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(Box::new(err))
    } else {
        ProviderError::Network(Box::new(err))
    }
}
