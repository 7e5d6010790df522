//! Call-scoped value records exchanged between the host and a provider.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::locale::LocalizedText;

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions.
    System,
    /// Human user.
    User,
    /// Model output.
    Assistant,
    /// Result of a tool invocation.
    Tool,
}

impl Role {
    /// Wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

/// A structured function invocation requested by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to invoke.
    pub name: String,
    /// Named arguments for the call.
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

/// One message of conversation history supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message.
    pub role: Role,
    /// Message text.
    #[serde(default)]
    pub content: String,
    /// Tool calls previously made by the assistant in this message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl ChatMessage {
    /// Build a message with text content and no tool calls.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Shorthand for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Shorthand for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Shorthand for an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Shorthand for a tool result message.
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(Role::Tool, content)
    }

    /// Attach tool calls to this message.
    #[must_use]
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = tool_calls;
        self
    }
}

/// A tool the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool identifier, sent upstream as the function name.
    pub id: String,
    /// Human-readable description, possibly keyed by locale.
    pub description: LocalizedText,
    /// JSON Schema for the tool's parameters.
    pub parameters: serde_json::Value,
}

/// A model available on the server, normalized for the host's model picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Identifier passed back in chat requests.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description, e.g. the parameter size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Token counts reported for one chat call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens evaluated.
    pub input_tokens: u64,
    /// Tokens generated.
    pub output_tokens: u64,
}

/// Whether and how the model should expose its reasoning.
///
/// `Low`, `Medium` and `High` are the server-specific effort levels that
/// some reasoning models accept in place of a plain on/off switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingMode {
    /// No reasoning requested.
    #[default]
    Off,
    /// Reasoning enabled.
    On,
    /// Low reasoning effort.
    Low,
    /// Medium reasoning effort.
    Medium,
    /// High reasoning effort.
    High,
}

impl ThinkingMode {
    /// Effort level name for the string-valued modes.
    #[must_use]
    pub fn level(&self) -> Option<&'static str> {
        match self {
            ThinkingMode::Low => Some("low"),
            ThinkingMode::Medium => Some("medium"),
            ThinkingMode::High => Some("high"),
            ThinkingMode::Off | ThinkingMode::On => None,
        }
    }

    /// Whether any reasoning is requested.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ThinkingMode::Off)
    }
}

impl fmt::Display for ThinkingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ThinkingMode::Off => "off",
            ThinkingMode::On => "on",
            ThinkingMode::Low => "low",
            ThinkingMode::Medium => "medium",
            ThinkingMode::High => "high",
        };
        f.write_str(s)
    }
}

/// Error returned when a thinking mode string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized thinking mode: {0:?}")]
pub struct ParseThinkingModeError(pub String);

impl FromStr for ThinkingMode {
    type Err = ParseThinkingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "off" | "false" => Ok(ThinkingMode::Off),
            "on" | "true" => Ok(ThinkingMode::On),
            "low" => Ok(ThinkingMode::Low),
            "medium" => Ok(ThinkingMode::Medium),
            "high" => Ok(ThinkingMode::High),
            _ => Err(ParseThinkingModeError(s.to_string())),
        }
    }
}

/// Per-call generation options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum number of tokens to generate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Tools the model may call.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    /// Reasoning mode.
    #[serde(default)]
    pub thinking: ThinkingMode,
}

/// A chat invocation from the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Server base URL (None or blank = provider default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Model to use (None or blank = provider default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Conversation history, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Generation options.
    #[serde(default)]
    pub options: ChatOptions,
}

impl ChatRequest {
    /// Build a request for the given history with default options.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }
}
