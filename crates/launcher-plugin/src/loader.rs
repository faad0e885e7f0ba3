//! Plugin loader boundary.
//!
//! Discovery and instantiation live behind [`PluginLoader`]; the runtime
//! only consumes the completed list of instances it yields.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use launcher_core::config::plugin::PluginSettingsOverride;
use launcher_core::{AppError, AppResult};

use crate::instance::PluginInstance;
use crate::metadata::{PluginMetadata, PluginSettings, SettingsHandle};
use crate::traits::Plugin;

/// Produces ready-to-use plugin instances.
#[async_trait]
pub trait PluginLoader: Send + Sync {
    /// Loads every plugin this loader knows about.
    async fn load(&self) -> AppResult<Vec<PluginInstance>>;
}

/// Loader for plugins compiled into the host binary.
#[derive(Debug, Default)]
pub struct StaticPluginLoader {
    entries: Vec<(PluginMetadata, Arc<dyn Plugin>)>,
    settings: HashMap<String, PluginSettingsOverride>,
}

impl StaticPluginLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies persisted per-plugin settings, keyed by plugin ID.
    pub fn with_settings(mut self, settings: HashMap<String, PluginSettingsOverride>) -> Self {
        self.settings = settings;
        self
    }

    /// Adds a compiled-in plugin.
    pub fn with_plugin(mut self, metadata: PluginMetadata, plugin: Arc<dyn Plugin>) -> Self {
        self.entries.push((metadata, plugin));
        self
    }
}

#[async_trait]
impl PluginLoader for StaticPluginLoader {
    async fn load(&self) -> AppResult<Vec<PluginInstance>> {
        let mut instances = Vec::with_capacity(self.entries.len());

        for (metadata, plugin) in &self.entries {
            if metadata.id.trim().is_empty() {
                return Err(AppError::plugin(format!(
                    "Plugin '{}' has an empty ID",
                    metadata.name
                )));
            }

            let settings = self
                .settings
                .get(&metadata.id)
                .map(PluginSettings::from)
                .unwrap_or_default();

            instances.push(PluginInstance::new(
                plugin.clone(),
                metadata.clone(),
                SettingsHandle::new(settings),
            ));
        }

        info!(count = instances.len(), "Static plugins loaded");
        Ok(instances)
    }
}
