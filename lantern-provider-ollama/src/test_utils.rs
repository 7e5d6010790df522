//! Scripted transport for testing.
//!
//! Available behind the `test-utils` feature flag. [`ScriptedTransport`]
//! hands out queued responses in order and records every request it sees,
//! so tests can control chunk boundaries exactly without a network.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use bytes::Bytes;
use lantern_types::ProviderError;

use crate::transport::{Transport, TransportResponse};

/// A request observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// `GET` or `POST`.
    pub method: &'static str,
    /// Full request URL.
    pub url: String,
    /// JSON body for POST requests.
    pub body: Option<serde_json::Value>,
}

/// In-memory [`Transport`] that replays a script of responses.
///
/// Once the script is exhausted every further request fails with a
/// [`ProviderError::Network`] error.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<TransportResponse, ProviderError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a prepared response.
    #[must_use]
    pub fn respond_with(self, response: TransportResponse) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queue a response whose body arrives as the given chunks.
    #[must_use]
    pub fn respond_with_chunks(self, status: u16, chunks: Vec<Bytes>) -> Self {
        self.respond_with(TransportResponse::from_chunks(status, chunks))
    }

    /// Queue a response with a single-chunk body.
    #[must_use]
    pub fn respond_with_body(self, status: u16, body: impl Into<String>) -> Self {
        self.respond_with_chunks(status, vec![Bytes::from(body.into())])
    }

    /// Queue a transport-level failure.
    #[must_use]
    pub fn respond_with_error(self, error: ProviderError) -> Self {
        self.push(Err(error));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn push(&self, entry: Result<TransportResponse, ProviderError>) {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(entry);
    }

    fn next(&self, request: RecordedRequest) -> Result<TransportResponse, ProviderError> {
        let url = request.url.clone();
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(ProviderError::Network(
                    format!("no scripted response left for {url}").into(),
                ))
            })
    }
}

impl Transport for ScriptedTransport {
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<TransportResponse, ProviderError>> + Send {
        let result = self.next(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            body: None,
        });
        async move { result }
    }

    fn post_json(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<TransportResponse, ProviderError>> + Send {
        let result = self.next(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            body: Some(body),
        });
        async move { result }
    }
}
