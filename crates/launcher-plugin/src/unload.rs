//! Unload policy — the single path that ends a plugin's lifetime at runtime.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::instance::PluginInstance;
use crate::registry::PluginRegistry;

/// Journal entry written each time a plugin is actually unloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnloadRecord {
    /// Plugin identifier.
    pub plugin_id: String,
    /// Plugin display name.
    pub plugin_name: String,
    /// Why the plugin was unloaded.
    pub reason: String,
    /// When the plugin was unloaded.
    pub unloaded_at: DateTime<Utc>,
}

/// Removes plugins from the registry and records why.
///
/// No retry and no reload: an unloaded plugin only comes back through a fresh load.
#[derive(Debug, Clone)]
pub struct UnloadPolicy {
    registry: Arc<PluginRegistry>,
    journal: Arc<RwLock<Vec<UnloadRecord>>>,
}

impl UnloadPolicy {
    /// Creates an unload policy operating on the given registry.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            journal: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Unloads `instance`. Returns `false` (and records nothing) if it was already gone.
    pub async fn unload(&self, instance: &Arc<PluginInstance>, reason: &str) -> bool {
        let metadata = instance.metadata();

        if !self.registry.remove(instance, reason).await {
            debug!(plugin_id = %metadata.id, reason = %reason, "Unload skipped, plugin not registered");
            return false;
        }

        info!(
            plugin_id = %metadata.id,
            "Plugin {} was unloaded because {}",
            metadata.name,
            reason
        );

        self.journal.write().await.push(UnloadRecord {
            plugin_id: metadata.id.clone(),
            plugin_name: metadata.name.clone(),
            reason: reason.to_string(),
            unloaded_at: Utc::now(),
        });

        true
    }

    /// Returns every unload recorded so far, oldest first.
    pub async fn journal(&self) -> Vec<UnloadRecord> {
        self.journal.read().await.clone()
    }

    /// Returns the registry this policy operates on.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }
}
