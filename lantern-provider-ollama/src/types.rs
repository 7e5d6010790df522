//! Ollama wire types for `/api/tags` and `/api/chat`.
//!
//! Key differences from OpenAI-compatible APIs:
//! - No auth headers required
//! - Tool call arguments are JSON objects (not strings)
//! - No tool call IDs from Ollama -- the provider must synthesize them
//! - Streaming responses are NDJSON, one object per line, not SSE

use serde::{Deserialize, Deserializer, Serialize};

/// Decode a field that Ollama may send as `null`, treating `null` like absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `/api/chat` request body.
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest {
    /// Model identifier (e.g. "llama3.2").
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<OllamaMessage>,
    /// Whether to stream the response. Always `true` for this provider.
    pub stream: bool,
    /// Generation options.
    pub options: OllamaOptions,
    /// Tools available to the model.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<OllamaTool>,
    /// Reasoning switch or effort level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub think: Option<ThinkFlag>,
}

/// Value of the `think` request field: `true` or an effort level string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ThinkFlag {
    /// `think: true`.
    Enabled(bool),
    /// `think: "low" | "medium" | "high"`.
    Level(&'static str),
}

/// A message in the `/api/chat` request.
#[derive(Debug, Serialize)]
pub struct OllamaMessage {
    /// Role: "system", "user", "assistant", or "tool".
    pub role: &'static str,
    /// Message text content.
    pub content: String,
    /// Tool calls made by the assistant (present only in assistant history).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<OllamaToolCall>,
}

/// A tool call, in requests (history) and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaToolCall {
    /// The function being called.
    pub function: OllamaFunctionCall,
}

/// A function call within a tool call.
///
/// Ollama sends `arguments` as a JSON object; some models emit a JSON
/// string instead, so responses keep the raw value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaFunctionCall {
    /// Name of the function to call.
    pub name: String,
    /// Arguments, normally a JSON object.
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Tool definition in the request.
#[derive(Debug, Serialize)]
pub struct OllamaTool {
    /// The type of tool (always "function").
    #[serde(rename = "type")]
    pub tool_type: &'static str,
    /// The function definition.
    pub function: OllamaFunction,
}

/// Function definition within a tool.
#[derive(Debug, Serialize)]
pub struct OllamaFunction {
    /// Function name.
    pub name: String,
    /// Function description.
    pub description: String,
    /// JSON Schema for the function parameters.
    pub parameters: serde_json::Value,
}

/// Generation options.
#[derive(Debug, Default, Serialize)]
pub struct OllamaOptions {
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

/// One NDJSON line of a streamed `/api/chat` response.
///
/// Every field is optional on the wire; partial objects still decode.
#[derive(Debug, Default, Deserialize)]
#[allow(dead_code)]
pub struct OllamaChatChunk {
    /// Model that generated the response.
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    /// Timestamp of this chunk.
    #[serde(default)]
    pub created_at: Option<String>,
    /// The message fragment.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: OllamaResponseMessage,
    /// Whether this is the terminal object.
    #[serde(default, deserialize_with = "null_as_default")]
    pub done: bool,
    /// Why generation stopped (e.g. "stop").
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    /// Number of tokens generated.
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// The `message` object of a streamed chunk.
#[derive(Debug, Default, Deserialize)]
#[allow(dead_code)]
pub struct OllamaResponseMessage {
    /// Role, normally "assistant".
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    /// Response text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Reasoning text, when thinking is enabled.
    #[serde(default)]
    pub thinking: Option<String>,
    /// Tool calls requested by the model.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tool_calls: Vec<OllamaToolCall>,
}

/// `/api/tags` response body.
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    /// Installed models.
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: Vec<TagModel>,
}

/// One installed model in `/api/tags`.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct TagModel {
    /// Model name including tag (e.g. "llama3.2:latest").
    pub name: String,
    /// Model identifier, usually equal to `name`.
    #[serde(default)]
    pub model: Option<String>,
    /// Last modification time.
    #[serde(default)]
    pub modified_at: Option<String>,
    /// Size on disk in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Content digest.
    #[serde(default)]
    pub digest: Option<String>,
    /// Model metadata.
    #[serde(default)]
    pub details: Option<TagDetails>,
}

/// `details` object of a tag entry.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct TagDetails {
    /// Human-readable parameter count (e.g. "8.0B").
    #[serde(default)]
    pub parameter_size: Option<String>,
    /// Model family (e.g. "llama").
    #[serde(default)]
    pub family: Option<String>,
    /// Quantization level (e.g. "Q4_K_M").
    #[serde(default)]
    pub quantization_level: Option<String>,
    /// File format (e.g. "gguf").
    #[serde(default)]
    pub format: Option<String>,
}
