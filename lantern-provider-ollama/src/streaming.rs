//! NDJSON streaming support for the Ollama Chat API.
//!
//! Ollama emits one JSON object per line:
//! ```text
//! {"model":"llama3.2","message":{"role":"assistant","content":"Hello"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":" world"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":""},"done":true,"done_reason":"stop","eval_count":10,"prompt_eval_count":20}
//! ```
//!
//! Network chunks do not respect line boundaries, so [`LineBuffer`] carries
//! partial lines over between chunks and [`ChatDecoder`] turns each complete
//! line into [`StreamEvent`]s. Lines that fail to parse are logged and
//! skipped. Every decoded stream ends with exactly one terminal event.
//!
//! Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md#generate-a-chat-completion>

use std::sync::Arc;

use futures::{Stream, StreamExt};
use lantern_types::{StreamEvent, TokenUsage};

use crate::error::map_http_status;
use crate::ids::next_tool_call_id;
use crate::mapping::arguments_to_map;
use crate::transport::Transport;
use crate::types::OllamaChatChunk;

/// Carry-over buffer that splits a byte stream into `\n`-terminated lines.
///
/// Splitting happens on raw bytes, so a multi-byte UTF-8 character cut in
/// half by a chunk boundary is reassembled before any decoding.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completed, without the
    /// trailing `\n` or `\r\n`. The incomplete tail stays buffered.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        // Only the new bytes can hold a newline; the carried tail has none.
        let start = self.buf.len();
        self.buf.extend_from_slice(chunk);
        let Some(last_newline) = self.buf[start..]
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| start + i)
        else {
            return Vec::new();
        };
        let complete: Vec<u8> = self.buf.drain(..=last_newline).collect();
        complete[..last_newline]
            .split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
            .collect()
    }

    /// Take whatever is left once the body has ended.
    ///
    /// Returns `None` when the remainder is empty or only whitespace.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        let rest = std::mem::take(&mut self.buf);
        if rest.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(rest)
        }
    }

    /// Number of buffered bytes not yet terminated by a newline.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

/// Per-call decoding state: buffered bytes in, [`StreamEvent`]s out.
#[derive(Debug, Default)]
pub struct ChatDecoder {
    lines: LineBuffer,
    terminal_seen: bool,
    usage: Option<TokenUsage>,
}

impl ChatDecoder {
    /// Create a decoder for one chat call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk and return the events of every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        for line in self.lines.push(chunk) {
            events.extend(self.process_line(&line));
        }
        events
    }

    /// Decode one complete line.
    ///
    /// Blank lines yield nothing. Lines that are not valid UTF-8 or not a
    /// chat-response object are logged and yield nothing.
    pub fn process_line(&mut self, line: &[u8]) -> Vec<StreamEvent> {
        let text = match std::str::from_utf8(line) {
            Ok(t) => t.trim(),
            Err(e) => {
                tracing::warn!(error = %e, len = line.len(), "skipping NDJSON line with invalid UTF-8");
                return Vec::new();
            }
        };
        if text.is_empty() {
            return Vec::new();
        }

        let chunk: OllamaChatChunk = match serde_json::from_str(text) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, line = %preview(text), "skipping malformed NDJSON line");
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        let message = chunk.message;

        if let Some(thinking) = message.thinking.filter(|t| !t.is_empty()) {
            events.push(StreamEvent::Thinking { text: thinking });
        }

        // Passed through as reported; hosts treat each as the full current text.
        if !message.content.is_empty() {
            events.push(StreamEvent::Content {
                text: message.content,
            });
        }

        if chunk.done {
            self.terminal_seen = true;
            self.usage = match (chunk.prompt_eval_count, chunk.eval_count) {
                (Some(input_tokens), Some(output_tokens)) => Some(TokenUsage {
                    input_tokens,
                    output_tokens,
                }),
                _ => None,
            };

            for call in message.tool_calls {
                let name = call.function.name;
                let input = arguments_to_map(&name, call.function.arguments);
                events.push(StreamEvent::ToolStart {
                    id: next_tool_call_id(),
                    name,
                    input,
                });
            }
        }

        events
    }

    /// Flush the buffered remainder and emit the terminal [`StreamEvent::Done`].
    pub fn finish(mut self) -> Vec<StreamEvent> {
        let mut events = match self.lines.finish() {
            Some(rest) => self.process_line(&rest),
            None => Vec::new(),
        };
        if !self.terminal_seen {
            tracing::warn!("chat stream ended without a terminal object; reporting no usage");
        }
        events.push(StreamEvent::Done { usage: self.usage });
        events
    }
}

/// POST the chat body and decode the streamed response.
///
/// Nothing is sent until the returned stream is first polled. Every failure
/// becomes a single terminal [`StreamEvent::Error`].
pub(crate) fn stream_chat<T: Transport>(
    transport: Arc<T>,
    url: String,
    body: serde_json::Value,
) -> impl Stream<Item = StreamEvent> + Send + 'static {
    async_stream::stream! {
        let response = match transport.post_json(&url, body).await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "chat request failed");
                yield StreamEvent::error(e.to_string());
                return;
            }
        };

        if !response.is_success() {
            let status = response.status;
            let text = response.text().await.unwrap_or_default();
            let err = map_http_status(status, &text);
            tracing::debug!(url = %url, status, "chat request rejected");
            yield StreamEvent::error(err.to_string());
            return;
        }

        let mut decoder = ChatDecoder::new();
        let mut body = response.body;

        while let Some(chunk_result) = body.next().await {
            let chunk = match chunk_result {
                Ok(b) => b,
                Err(e) => {
                    yield StreamEvent::error(format!("stream read error: {e}"));
                    return;
                }
            };
            for event in decoder.push(&chunk) {
                yield event;
            }
        }

        for event in decoder.finish() {
            yield event;
        }
    }
}

fn preview(line: &str) -> &str {
    const MAX: usize = 120;
    if line.len() <= MAX {
        return line;
    }
    let mut end = MAX;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

// ─── Tests ───────────────────────────────────────────────────────────────────
