//! Request/response mapping between lantern-types and the Ollama API format.
//!
//! Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md>

use lantern_types::{
    ChatMessage, ChatRequest, ModelSummary, ThinkingMode, ToolCall, ToolDefinition,
};

use crate::config::OllamaConfig;
use crate::types::{
    OllamaChatRequest, OllamaFunction, OllamaFunctionCall, OllamaMessage, OllamaOptions,
    OllamaTool, OllamaToolCall, TagModel, TagsResponse, ThinkFlag,
};

// ─── Request mapping ─────────────────────────────────────────────────────────

/// Convert a [`ChatRequest`] into the `/api/chat` body.
///
/// Request values win over configured defaults. The body always streams.
#[must_use]
pub fn to_api_request(req: &ChatRequest, config: &OllamaConfig) -> OllamaChatRequest {
    let thinking = if req.options.thinking.is_enabled() {
        req.options.thinking
    } else {
        config.thinking
    };

    OllamaChatRequest {
        model: config.resolve_model(req.model.as_deref()),
        messages: req.messages.iter().map(map_message).collect(),
        stream: true,
        options: OllamaOptions {
            temperature: req.options.temperature.or(config.temperature),
            num_predict: req.options.max_tokens.or(config.max_tokens),
        },
        tools: req.options.tools.iter().map(map_tool_definition).collect(),
        think: think_flag(thinking),
    }
}

/// Map one history message. Roles pass through unchanged.
fn map_message(msg: &ChatMessage) -> OllamaMessage {
    OllamaMessage {
        role: msg.role.as_str(),
        content: msg.content.clone(),
        tool_calls: msg.tool_calls.iter().map(map_tool_call).collect(),
    }
}

fn map_tool_call(call: &ToolCall) -> OllamaToolCall {
    OllamaToolCall {
        function: OllamaFunctionCall {
            name: call.name.clone(),
            arguments: serde_json::Value::Object(call.arguments.clone()),
        },
    }
}

/// Map a [`ToolDefinition`] to Ollama's tool format (OpenAI-compatible).
fn map_tool_definition(tool: &ToolDefinition) -> OllamaTool {
    OllamaTool {
        tool_type: "function",
        function: OllamaFunction {
            name: tool.id.clone(),
            description: tool.description.resolve().to_string(),
            parameters: tool.parameters.clone(),
        },
    }
}

/// The `think` field for a mode; `None` omits it.
#[must_use]
pub fn think_flag(mode: ThinkingMode) -> Option<ThinkFlag> {
    match mode {
        ThinkingMode::Off => None,
        ThinkingMode::On => Some(ThinkFlag::Enabled(true)),
        other => other.level().map(ThinkFlag::Level),
    }
}

// ─── Response mapping ─────────────────────────────────────────────────────────

/// Map an `/api/tags` body to model summaries, preserving order.
#[must_use]
pub fn from_tags_response(tags: TagsResponse) -> Vec<ModelSummary> {
    tags.models.into_iter().map(map_tag_model).collect()
}

fn map_tag_model(model: TagModel) -> ModelSummary {
    let description = model
        .details
        .and_then(|d| d.parameter_size)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    ModelSummary {
        id: model.name.clone(),
        name: model.name,
        description,
    }
}

/// Normalize tool call arguments from the wire into a JSON object.
///
/// Objects pass through; a string holding a JSON object is decoded; anything
/// else becomes an empty map.
pub(crate) fn arguments_to_map(
    name: &str,
    arguments: serde_json::Value,
) -> serde_json::Map<String, serde_json::Value> {
    match arguments {
        serde_json::Value::Object(map) => map,
        serde_json::Value::Null => serde_json::Map::new(),
        serde_json::Value::String(raw) => match serde_json::from_str(&raw) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => {
                tracing::warn!(tool = %name, "tool call arguments are not a JSON object; using empty arguments");
                serde_json::Map::new()
            }
        },
        other => {
            tracing::warn!(tool = %name, kind = %json_kind(&other), "tool call arguments are not a JSON object; using empty arguments");
            serde_json::Map::new()
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
