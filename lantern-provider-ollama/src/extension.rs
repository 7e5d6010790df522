//! Host lifecycle hooks for the Ollama provider.

use std::sync::Arc;

use lantern_types::{Extension, ExtensionContext, ProviderError, ProviderRegistry};

use crate::client::{Ollama, PROVIDER_ID};
use crate::config::OllamaConfig;

/// Registers an [`Ollama`] provider with the host on activation and removes
/// it on deactivation.
///
/// Configuration is read from the host's `ollama.*` settings at activation
/// time; reactivating picks up changed settings.
#[derive(Debug, Default)]
pub struct OllamaExtension {
    active: bool,
}

impl OllamaExtension {
    /// Create an inactive extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the provider is currently registered by this extension.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Extension for OllamaExtension {
    fn activate(&mut self, ctx: ExtensionContext<'_>) -> Result<(), ProviderError> {
        let config = OllamaConfig::from_settings(ctx.settings)?;
        tracing::info!(
            base_url = %config.base_url,
            model = %config.resolve_model(None),
            thinking = %config.thinking,
            "activating Ollama provider"
        );
        ctx.registry.register(Arc::new(Ollama::with_config(config)));
        self.active = true;
        Ok(())
    }

    fn deactivate(&mut self, registry: &mut ProviderRegistry) {
        if registry.unregister(PROVIDER_ID).is_some() {
            tracing::info!("deactivated Ollama provider");
        }
        self.active = false;
    }
}
