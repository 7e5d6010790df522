//! Provider configuration and its sources.
//!
//! Values come from three places, in the order a host usually layers them:
//! [`OllamaConfig::default`], the process environment
//! ([`OllamaConfig::from_env`]), and the host's settings storage
//! ([`OllamaConfig::from_settings`]). Per-call values on a
//! [`ChatRequest`](lantern_types::ChatRequest) override all of them.

use lantern_types::{ProviderError, SettingsSource, ThinkingMode};

/// Default Ollama API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Model used when neither the request nor the configuration names one.
pub const FALLBACK_MODEL: &str = "llama3.2";

/// Host settings keys read by [`OllamaConfig::from_settings`].
pub mod keys {
    /// Server base URL.
    pub const SERVER_URL: &str = "ollama.serverUrl";
    /// Default model name.
    pub const DEFAULT_MODEL: &str = "ollama.defaultModel";
    /// Thinking mode (`off`, `on`, `low`, `medium`, `high`).
    pub const THINKING: &str = "ollama.thinking";
    /// Default sampling temperature.
    pub const TEMPERATURE: &str = "ollama.temperature";
    /// Default maximum output tokens.
    pub const MAX_TOKENS: &str = "ollama.maxTokens";
}

/// Environment variables read by [`OllamaConfig::from_env`].
pub mod env {
    /// Server address, with or without scheme (`127.0.0.1:11434`).
    pub const HOST: &str = "OLLAMA_HOST";
    /// Default model name.
    pub const MODEL: &str = "OLLAMA_MODEL";
    /// Thinking mode.
    pub const THINKING: &str = "OLLAMA_THINKING";
}

/// Static configuration for an [`Ollama`](crate::Ollama) provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Server base URL, without the `/api/...` path.
    pub base_url: String,
    /// Model used when the request does not name one.
    pub default_model: Option<String>,
    /// Thinking mode used when the request leaves it off.
    pub thinking: ThinkingMode,
    /// Temperature used when the request does not set one.
    pub temperature: Option<f64>,
    /// Output token limit used when the request does not set one.
    pub max_tokens: Option<u32>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            default_model: None,
            thinking: ThinkingMode::Off,
            temperature: None,
            max_tokens: None,
        }
    }
}

impl OllamaConfig {
    /// Read `OLLAMA_HOST`, `OLLAMA_MODEL` and `OLLAMA_THINKING`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Settings`] if `OLLAMA_THINKING` is not a
    /// recognized mode.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(
            |name| std::env::var(name).ok(),
            env::HOST,
            env::MODEL,
            env::THINKING,
            None,
            None,
        )
    }

    /// Read the `ollama.*` keys from the host's settings storage.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Settings`] naming the first key whose value
    /// cannot be parsed.
    pub fn from_settings(settings: &dyn SettingsSource) -> Result<Self, ProviderError> {
        Self::from_lookup(
            |key| settings.get(key),
            keys::SERVER_URL,
            keys::DEFAULT_MODEL,
            keys::THINKING,
            Some(keys::TEMPERATURE),
            Some(keys::MAX_TOKENS),
        )
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        url_key: &str,
        model_key: &str,
        thinking_key: &str,
        temperature_key: Option<&str>,
        max_tokens_key: Option<&str>,
    ) -> Result<Self, ProviderError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(url_key) {
            config.base_url = normalize_base_url(&url);
        }
        config.default_model = get(model_key).map(|m| m.trim().to_string());

        if let Some(mode) = get(thinking_key) {
            config.thinking = mode
                .parse()
                .map_err(|e| ProviderError::Settings(format!("{thinking_key}: {e}")))?;
        }
        if let Some(key) = temperature_key {
            if let Some(raw) = get(key) {
                let value: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| ProviderError::Settings(format!("{key}: {e}")))?;
                config.temperature = Some(value);
            }
        }
        if let Some(key) = max_tokens_key {
            if let Some(raw) = get(key) {
                let value: u32 = raw
                    .trim()
                    .parse()
                    .map_err(|e| ProviderError::Settings(format!("{key}: {e}")))?;
                config.max_tokens = Some(value);
            }
        }
        Ok(config)
    }

    /// Base URL for one call: the per-call URL if non-blank, else the
    /// configured one, else [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn resolve_base_url(&self, server_url: Option<&str>) -> String {
        server_url
            .filter(|u| !u.trim().is_empty())
            .or(Some(self.base_url.as_str()).filter(|u| !u.trim().is_empty()))
            .map(normalize_base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Model for one call: the per-call model if non-blank, else the
    /// configured default, else [`FALLBACK_MODEL`].
    #[must_use]
    pub fn resolve_model(&self, model: Option<&str>) -> String {
        let non_blank = |m: &&str| !m.is_empty();
        model
            .map(str::trim)
            .filter(non_blank)
            .or_else(|| self.default_model.as_deref().map(str::trim).filter(non_blank))
            .unwrap_or(FALLBACK_MODEL)
            .to_string()
    }
}

/// Trim whitespace and trailing slashes, and add `http://` when the value
/// has no scheme (as `OLLAMA_HOST` commonly does).
pub(crate) fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}
