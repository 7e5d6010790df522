//! The network capability the provider issues its requests through.
//!
//! [`ReqwestTransport`] is the production implementation. Hosts with their
//! own HTTP stack, and tests that need precise control over chunk
//! boundaries, implement [`Transport`] directly.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt, TryStreamExt};
use lantern_types::ProviderError;
use serde::de::DeserializeOwned;

use crate::error::map_reqwest_error;

/// Incremental response body.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ProviderError>> + Send>>;

/// Status and unbuffered body of an HTTP response.
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body chunks in receipt order.
    pub body: ByteStream,
}

impl TransportResponse {
    /// Build a response from already-known chunks.
    pub fn from_chunks<I>(status: u16, chunks: I) -> Self
    where
        I: IntoIterator<Item = Bytes>,
        I::IntoIter: Send + 'static,
    {
        Self {
            status,
            body: Box::pin(futures::stream::iter(chunks.into_iter().map(Ok::<Bytes, ProviderError>))),
        }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Buffer the whole body as text. Invalid UTF-8 is replaced.
    pub async fn text(self) -> Result<String, ProviderError> {
        let bytes: Vec<u8> = self
            .body
            .try_fold(Vec::new(), |mut acc, chunk| async move {
                acc.extend_from_slice(&chunk);
                Ok::<_, ProviderError>(acc)
            })
            .await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Buffer the whole body and decode it as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, ProviderError> {
        let text = self.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ProviderError::InvalidResponse(format!("invalid JSON response: {e}")))
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Outbound HTTP used by the provider.
///
/// Implementations apply their own timeouts; the provider adds none.
pub trait Transport: Send + Sync + 'static {
    /// Issue an unauthenticated GET.
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<TransportResponse, ProviderError>> + Send;

    /// Issue a POST with a JSON body.
    fn post_json(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<TransportResponse, ProviderError>> + Send;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, proxies, TLS roots).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<TransportResponse, ProviderError>> + Send {
        let request = self.client.get(url);
        async move {
            let response = request.send().await.map_err(map_reqwest_error)?;
            Ok(into_transport_response(response))
        }
    }

    fn post_json(
        &self,
        url: &str,
        body: serde_json::Value,
    ) -> impl Future<Output = Result<TransportResponse, ProviderError>> + Send {
        let request = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(&body);
        async move {
            let response = request.send().await.map_err(map_reqwest_error)?;
            Ok(into_transport_response(response))
        }
    }
}

fn into_transport_response(response: reqwest::Response) -> TransportResponse {
    let status = response.status().as_u16();
    let body = response.bytes_stream().map(|r| r.map_err(map_reqwest_error));
    TransportResponse {
        status,
        body: Box::pin(body),
    }
}
