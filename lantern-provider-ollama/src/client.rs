//! Ollama API client struct and builder.

use std::future::Future;
use std::sync::Arc;

#[allow(unused_imports)] // StreamEvent used in doc links
use lantern_types::{
    ChatRequest, ModelProvider, ModelSummary, ProviderError, StreamEvent, StreamHandle,
    ThinkingMode,
};

use crate::config::OllamaConfig;
use crate::error::map_http_status;
use crate::mapping::{from_tags_response, to_api_request};
use crate::streaming::stream_chat;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::TagsResponse;

/// Registry id of the Ollama provider.
pub const PROVIDER_ID: &str = "ollama";

/// Name shown to users.
pub const DISPLAY_NAME: &str = "Ollama";

/// Client for a local or remote Ollama server.
///
/// Implements [`ModelProvider`] for use anywhere a provider is accepted.
/// No authentication is sent; Ollama is usually reached on the local machine.
///
/// # Example
///
/// ```no_run
/// use lantern_provider_ollama::Ollama;
///
/// let client = Ollama::new()
///     .model("llama3.2")
///     .base_url("http://localhost:11434");
/// ```
pub struct Ollama<T: Transport = ReqwestTransport> {
    config: OllamaConfig,
    transport: Arc<T>,
}

impl Ollama {
    /// Create a client with the default configuration.
    ///
    /// Default base URL: `http://localhost:11434`. Default model: `llama3.2`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(OllamaConfig::default())
    }

    /// Create a client from an explicit configuration.
    #[must_use]
    pub fn with_config(config: OllamaConfig) -> Self {
        Self {
            config,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    /// Create a client configured from `OLLAMA_HOST`, `OLLAMA_MODEL` and
    /// `OLLAMA_THINKING`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Settings`] if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ProviderError> {
        Ok(Self::with_config(OllamaConfig::from_env()?))
    }
}

impl Default for Ollama {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Ollama<T> {
    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(config: OllamaConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Swap the transport, keeping the configuration.
    pub fn transport<U: Transport>(self, transport: U) -> Ollama<U> {
        Ollama::with_transport(self.config, transport)
    }

    /// Override the server base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = crate::config::normalize_base_url(&url.into());
        self
    }

    /// Override the model used when a request does not name one.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = Some(model.into());
        self
    }

    /// Set the thinking mode used when a request leaves it off.
    #[must_use]
    pub fn thinking(mut self, mode: ThinkingMode) -> Self {
        self.config.thinking = mode;
        self
    }

    /// Set the default sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the default output token limit.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = Some(max_tokens);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    pub(crate) fn tags_url(&self, server_url: Option<&str>) -> String {
        format!("{}/api/tags", self.config.resolve_base_url(server_url))
    }

    pub(crate) fn chat_url(&self, server_url: Option<&str>) -> String {
        format!("{}/api/chat", self.config.resolve_base_url(server_url))
    }
}

impl<T: Transport> ModelProvider for Ollama<T> {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn display_name(&self) -> &str {
        DISPLAY_NAME
    }

    /// Fetch `/api/tags` and map each entry to a [`ModelSummary`].
    fn list_models(
        &self,
        server_url: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ModelSummary>, ProviderError>> + Send {
        let url = self.tags_url(server_url);
        let transport = Arc::clone(&self.transport);

        async move {
            tracing::debug!(url = %url, "listing Ollama models");

            let response = transport.get(&url).await?;
            if !response.is_success() {
                let status = response.status;
                let body = response.text().await.unwrap_or_default();
                return Err(map_http_status(status, &body));
            }

            let tags: TagsResponse = response.json().await?;
            let models = from_tags_response(tags);
            tracing::debug!(count = models.len(), "listed Ollama models");
            Ok(models)
        }
    }

    /// POST to `/api/chat` with `stream: true` and decode the NDJSON reply.
    ///
    /// The request is not sent until the handle's receiver is first polled.
    /// Failures arrive as a terminal [`StreamEvent::Error`].
    fn stream_chat(&self, request: ChatRequest) -> StreamHandle {
        let url = self.chat_url(request.server_url.as_deref());
        let api_request = to_api_request(&request, &self.config);
        let body = match serde_json::to_value(&api_request) {
            Ok(b) => b,
            Err(e) => {
                return StreamHandle::failed(format!("failed to encode chat request: {e}"));
            }
        };

        tracing::debug!(url = %url, model = %api_request.model, "sending streaming chat request to Ollama");

        StreamHandle::new(stream_chat(Arc::clone(&self.transport), url, body))
    }
}
