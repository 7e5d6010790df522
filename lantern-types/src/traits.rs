//! Core traits: ModelProvider and its type-erased form, ModelProviderDyn.

use std::future::Future;
use std::pin::Pin;

use crate::error::ProviderError;
use crate::stream::StreamHandle;
use crate::types::{ChatRequest, ModelSummary};

/// Boxed future used at the object-safe boundary.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A model backend the host can list models from and chat with.
///
/// Uses RPITIT and is not object-safe; hosts that need a heterogeneous
/// collection go through [`ModelProviderDyn`], which every implementation
/// gets for free.
///
/// # Example
///
/// ```ignore
/// struct Echo;
///
/// impl ModelProvider for Echo {
///     fn id(&self) -> &str { "echo" }
///     fn display_name(&self) -> &str { "Echo" }
///
///     fn list_models(&self, _server_url: Option<&str>)
///         -> impl Future<Output = Result<Vec<ModelSummary>, ProviderError>> + Send
///     {
///         async { Ok(vec![]) }
///     }
///
///     fn stream_chat(&self, _request: ChatRequest) -> StreamHandle {
///         StreamHandle::new(futures::stream::iter([StreamEvent::Done { usage: None }]))
///     }
/// }
/// ```
pub trait ModelProvider: Send + Sync {
    /// Stable provider identifier used as the registry key.
    fn id(&self) -> &str;

    /// Name shown to users.
    fn display_name(&self) -> &str;

    /// List the models available on the server.
    ///
    /// All-or-nothing: a failure yields no partial list.
    fn list_models(
        &self,
        server_url: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ModelSummary>, ProviderError>> + Send;

    /// Start a chat call and return its lazily produced events.
    ///
    /// Never fails directly; every failure arrives as a terminal
    /// [`StreamEvent::Error`](crate::StreamEvent::Error).
    fn stream_chat(&self, request: ChatRequest) -> StreamHandle;
}

/// Type-erased provider for dynamic dispatch. Blanket-implemented for all
/// [`ModelProvider`] impls.
pub trait ModelProviderDyn: Send + Sync {
    /// See [`ModelProvider::id`].
    fn id(&self) -> &str;

    /// See [`ModelProvider::display_name`].
    fn display_name(&self) -> &str;

    /// See [`ModelProvider::list_models`].
    fn list_models_dyn<'a>(
        &'a self,
        server_url: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ModelSummary>, ProviderError>>;

    /// See [`ModelProvider::stream_chat`].
    fn stream_chat_dyn(&self, request: ChatRequest) -> StreamHandle;
}

impl<T: ModelProvider> ModelProviderDyn for T {
    fn id(&self) -> &str {
        ModelProvider::id(self)
    }

    fn display_name(&self) -> &str {
        ModelProvider::display_name(self)
    }

    fn list_models_dyn<'a>(
        &'a self,
        server_url: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ModelSummary>, ProviderError>> {
        Box::pin(self.list_models(server_url))
    }

    fn stream_chat_dyn(&self, request: ChatRequest) -> StreamHandle {
        self.stream_chat(request)
    }
}
