//! Streaming event types for chat responses.

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::types::TokenUsage;

/// An event emitted while a chat response streams in.
///
/// Every stream ends with exactly one terminal event, [`StreamEvent::Done`]
/// or [`StreamEvent::Error`], and nothing follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Reasoning text reported by the model.
    Thinking {
        /// The reasoning text.
        text: String,
    },
    /// Response text.
    ///
    /// Carries the full text reported by the server for this update. Hosts
    /// replace what they display rather than appending.
    Content {
        /// The response text.
        text: String,
    },
    /// The model requested a tool invocation.
    ToolStart {
        /// Generated call identifier, unique within the process.
        id: String,
        /// Tool name.
        name: String,
        /// Call arguments.
        input: serde_json::Map<String, serde_json::Value>,
    },
    /// The response completed.
    Done {
        /// Token counts, present only when the server reported both.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        usage: Option<TokenUsage>,
    },
    /// The call failed. Events already emitted stand.
    Error {
        /// Human-readable failure description.
        message: String,
    },
}

impl StreamEvent {
    /// Whether this event ends the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done { .. } | StreamEvent::Error { .. })
    }

    /// Shorthand for [`StreamEvent::Thinking`].
    pub fn thinking(text: impl Into<String>) -> Self {
        StreamEvent::Thinking { text: text.into() }
    }

    /// Shorthand for [`StreamEvent::Content`].
    pub fn content(text: impl Into<String>) -> Self {
        StreamEvent::Content { text: text.into() }
    }

    /// Shorthand for [`StreamEvent::Error`].
    pub fn error(message: impl Into<String>) -> Self {
        StreamEvent::Error {
            message: message.into(),
        }
    }
}

/// Handle to a lazily produced chat response.
///
/// Nothing happens until the receiver is polled. Dropping it abandons the
/// response without side effects.
pub struct StreamHandle {
    /// The stream of events. Consume with `StreamExt::next()`.
    pub receiver: Pin<Box<dyn Stream<Item = StreamEvent> + Send>>,
}

impl StreamHandle {
    /// Wrap any event stream.
    pub fn new(stream: impl Stream<Item = StreamEvent> + Send + 'static) -> Self {
        Self {
            receiver: Box::pin(stream),
        }
    }

    /// A handle that yields a single [`StreamEvent::Error`].
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(futures::stream::iter([StreamEvent::error(message)]))
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}
