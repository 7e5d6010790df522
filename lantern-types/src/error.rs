//! Error types shared by every provider.

/// Errors from provider operations.
///
/// Variants derived from an HTTP status always include the numeric status
/// in their display text.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    // Retryable errors
    /// Network-level error (connection refused, DNS failure, reset).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request timed out in the transport. Carries the transport's own error,
    /// which names whatever limit the caller configured.
    #[error("request timed out: {0}")]
    Timeout(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Server answered with a 5xx status.
    #[error("service unavailable (HTTP {status}): {body}")]
    ServiceUnavailable {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    // Terminal errors
    /// Server answered 404, usually an unknown model.
    #[error("model not found (HTTP 404): {0}")]
    ModelNotFound(String),
    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },
    /// The response body could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// A host setting had an unusable value.
    #[error("invalid setting: {0}")]
    Settings(String),

    // Catch-all
    /// Error while reading a streamed body.
    #[error("stream error: {0}")]
    Stream(String),
    /// Any other provider error.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    /// Whether this error is likely transient and the request can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::ServiceUnavailable { .. } => true,
            Self::Http { status, .. } => *status == 429,
            _ => false,
        }
    }

    /// HTTP status behind this error, if it came from one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ModelNotFound(_) => Some(404),
            Self::ServiceUnavailable { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
