//! Extension lifecycle: how a host loads and unloads a provider.
//!
//! The host owns activation order, settings storage and disposal. An
//! extension only sees the two hooks on [`Extension`] and the
//! [`ExtensionContext`] handed to `activate`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::ProviderError;
use crate::traits::ModelProviderDyn;

/// Read-only view of the host's settings storage.
pub trait SettingsSource: Send + Sync {
    /// Raw value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl SettingsSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

/// Providers the host currently exposes, keyed by provider id.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn ModelProviderDyn>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own id, replacing any previous one.
    pub fn register(&mut self, provider: Arc<dyn ModelProviderDyn>) {
        let id = provider.id().to_string();
        self.providers.insert(id, provider);
    }

    /// Remove a provider. Returns it if it was registered.
    pub fn unregister(&mut self, id: &str) -> Option<Arc<dyn ModelProviderDyn>> {
        self.providers.remove(id)
    }

    /// Look up a provider by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn ModelProviderDyn>> {
        self.providers.get(id).cloned()
    }

    /// Registered provider ids in sorted order.
    pub fn ids(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// What the host hands an extension on activation.
pub struct ExtensionContext<'a> {
    /// Registry to add providers to.
    pub registry: &'a mut ProviderRegistry,
    /// Host settings.
    pub settings: &'a dyn SettingsSource,
}

/// Load/unload hooks driven by the host.
pub trait Extension {
    /// Called once when the host loads the extension.
    fn activate(&mut self, ctx: ExtensionContext<'_>) -> Result<(), ProviderError>;

    /// Called when the host unloads the extension. Must undo `activate`.
    fn deactivate(&mut self, registry: &mut ProviderRegistry);
}
