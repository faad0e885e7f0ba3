//! Plugin registry — the live, ordered set of loaded plugin instances.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::instance::PluginInstance;

/// Registry of all loaded plugins.
///
/// Mutated only by a bulk [`load`](Self::load) and single-element
/// [`remove`](Self::remove). Readers always receive a cloned snapshot, so a
/// removal never disturbs an iteration already in progress.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    instances: RwLock<Vec<Arc<PluginInstance>>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire live set, returning the number of instances kept.
    ///
    /// Instances whose ID was already seen earlier in `instances` are dropped.
    pub async fn load<I>(&self, instances: I) -> usize
    where
        I: IntoIterator<Item = PluginInstance>,
    {
        let mut seen = HashSet::new();
        let mut loaded = Vec::new();

        for instance in instances {
            if !seen.insert(instance.id().to_string()) {
                warn!(plugin_id = %instance.id(), "Duplicate plugin ID, skipping");
                continue;
            }
            loaded.push(Arc::new(instance));
        }

        let count = loaded.len();
        *self.instances.write().await = loaded;

        info!(count, "Plugin registry loaded");
        count
    }

    /// Returns an ordered snapshot of every registered instance.
    pub async fn all(&self) -> Vec<Arc<PluginInstance>> {
        self.instances.read().await.clone()
    }

    /// Removes one instance by identity. Returns `false` if it was not registered.
    pub async fn remove(&self, instance: &Arc<PluginInstance>, reason: &str) -> bool {
        let mut instances = self.instances.write().await;
        let before = instances.len();
        instances.retain(|i| !Arc::ptr_eq(i, instance));
        let removed = instances.len() < before;

        if removed {
            info!(plugin_id = %instance.id(), reason = %reason, "Plugin removed from registry");
        } else {
            debug!(plugin_id = %instance.id(), "Plugin already absent from registry");
        }

        removed
    }

    /// Gets an instance by plugin ID.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<PluginInstance>> {
        let instances = self.instances.read().await;
        instances.iter().find(|i| i.id() == plugin_id).cloned()
    }

    /// Checks whether a plugin is registered.
    pub async fn contains(&self, plugin_id: &str) -> bool {
        self.get(plugin_id).await.is_some()
    }

    /// Returns plugin count.
    pub async fn len(&self) -> usize {
        self.instances.read().await.len()
    }

    /// Returns whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.instances.read().await.is_empty()
    }

    /// Returns every non-global trigger keyword declared by a registered plugin.
    pub async fn trigger_keywords(&self) -> BTreeSet<String> {
        let instances = self.instances.read().await;
        instances
            .iter()
            .flat_map(|i| i.metadata().keywords())
            .map(str::to_string)
            .collect()
    }
}
