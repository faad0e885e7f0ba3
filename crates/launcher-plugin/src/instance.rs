//! Plugin instance — the runtime unit held by the registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::metadata::{PluginMetadata, PluginSettings, SettingsHandle};
use crate::traits::Plugin;

/// A loaded plugin: its implementation, metadata, settings, and runtime state.
pub struct PluginInstance {
    plugin: Arc<dyn Plugin>,
    metadata: Arc<PluginMetadata>,
    settings: SettingsHandle,
    /// Set once `init` has succeeded.
    ready: AtomicBool,
    init_duration_ms: AtomicU64,
}

impl PluginInstance {
    /// Creates an instance pending initialization.
    pub fn new(plugin: Arc<dyn Plugin>, metadata: PluginMetadata, settings: SettingsHandle) -> Self {
        Self {
            plugin,
            metadata: Arc::new(metadata),
            settings,
            ready: AtomicBool::new(false),
            init_duration_ms: AtomicU64::new(0),
        }
    }

    /// Creates an instance with default settings.
    pub fn with_default_settings(plugin: Arc<dyn Plugin>, metadata: PluginMetadata) -> Self {
        Self::new(plugin, metadata, SettingsHandle::new(PluginSettings::default()))
    }

    /// The plugin implementation.
    pub fn plugin(&self) -> &Arc<dyn Plugin> {
        &self.plugin
    }

    /// The plugin's static metadata.
    pub fn metadata(&self) -> &Arc<PluginMetadata> {
        &self.metadata
    }

    /// Shared settings handle.
    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    /// Plugin ID shortcut.
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    /// Whether `init` has completed successfully.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Wall time spent in a successful `init`, if any.
    pub fn init_duration(&self) -> Option<Duration> {
        self.is_ready()
            .then(|| Duration::from_millis(self.init_duration_ms()))
    }

    /// Milliseconds spent in `init`; zero until it succeeds.
    pub fn init_duration_ms(&self) -> u64 {
        self.init_duration_ms.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_ready(&self, init_duration: Duration) {
        let ms = u64::try_from(init_duration.as_millis()).unwrap_or(u64::MAX);
        self.init_duration_ms.store(ms, Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginInstance")
            .field("id", &self.metadata.id)
            .field("name", &self.metadata.name)
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::api::context::PluginInitContext;
    use crate::error::PluginError;
    use crate::query::{Query, QueryResult};

    #[derive(Debug)]
    struct Inert;

    #[async_trait]
    impl Plugin for Inert {
        async fn init(&self, _context: PluginInitContext) -> Result<(), PluginError> {
            Ok(())
        }

        async fn query(&self, _query: &Query) -> Result<Vec<QueryResult>, PluginError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_init_duration_recorded_once_ready() {
        let instance = PluginInstance::with_default_settings(Arc::new(Inert), PluginMetadata::new("p", "P"));
        assert_eq!(instance.init_duration(), None);
        assert_eq!(instance.init_duration_ms(), 0);

        instance.mark_ready(Duration::from_millis(42));
        assert!(instance.is_ready());
        assert_eq!(instance.init_duration(), Some(Duration::from_millis(42)));
        assert_eq!(instance.init_duration_ms(), 42);
    }

    #[test]
    fn test_init_duration_saturates() {
        let instance = PluginInstance::with_default_settings(Arc::new(Inert), PluginMetadata::new("p", "P"));
        instance.mark_ready(Duration::MAX);
        assert_eq!(instance.init_duration_ms(), u64::MAX);
    }
}
