#![deny(missing_docs)]
//! Ollama provider for lantern hosts.
//!
//! Implements [`lantern_types::ModelProvider`] against Ollama's HTTP API:
//! `GET /api/tags` for model discovery and `POST /api/chat` with NDJSON
//! streaming for chat. Ollama runs locally, so no auth headers are sent.
//!
//! ```no_run
//! use futures::StreamExt;
//! use lantern_provider_ollama::{ChatMessage, ChatRequest, ModelProvider, Ollama, StreamEvent};
//!
//! # async fn run() {
//! let ollama = Ollama::new().model("llama3.2");
//! let mut handle = ollama.stream_chat(ChatRequest::new(vec![ChatMessage::user("Hello")]));
//! while let Some(event) = handle.receiver.next().await {
//!     if let StreamEvent::Content { text } = event {
//!         println!("{text}");
//!     }
//! }
//! # }
//! ```

pub mod client;
pub mod config;
mod error;
pub mod extension;
pub mod ids;
pub mod mapping;
pub mod streaming;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{DISPLAY_NAME, Ollama, PROVIDER_ID};
pub use config::OllamaConfig;
pub use extension::OllamaExtension;
pub use streaming::{ChatDecoder, LineBuffer};
pub use transport::{ReqwestTransport, Transport, TransportResponse};

// Re-export the contract so hosts can depend on this crate alone.
pub use lantern_types::*;
