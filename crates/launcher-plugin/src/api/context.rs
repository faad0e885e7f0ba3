//! Init context — the host API handle passed to every plugin at init time.

use std::sync::Arc;

use async_trait::async_trait;

use crate::metadata::PluginMetadata;

/// Capability surface of the launcher available to plugins.
///
/// The runtime only threads this handle through; the host shell implements it.
#[async_trait]
pub trait PublicApi: Send + Sync {
    /// Replaces the text in the query box.
    async fn change_query(&self, query: &str);
    /// Shows the launcher window.
    async fn show_app(&self);
    /// Hides the launcher window.
    async fn hide_app(&self);
    /// Shows a notification.
    async fn show_msg(&self, title: &str, sub_title: &str, icon_path: Option<&str>);
}

/// Context passed to [`Plugin::init`](crate::traits::Plugin::init).
#[derive(Clone)]
pub struct PluginInitContext {
    /// Host API handle.
    pub api: Arc<dyn PublicApi>,
    /// Metadata of the plugin being initialized.
    pub metadata: Arc<PluginMetadata>,
}

impl PluginInitContext {
    /// Creates a new init context.
    pub fn new(api: Arc<dyn PublicApi>, metadata: Arc<PluginMetadata>) -> Self {
        Self { api, metadata }
    }
}

impl std::fmt::Debug for PluginInitContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginInitContext")
            .field("plugin_id", &self.metadata.id)
            .finish()
    }
}

/// API handle that ignores every call, for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublicApi;

#[async_trait]
impl PublicApi for NoopPublicApi {
    async fn change_query(&self, _query: &str) {}

    async fn show_app(&self) {}

    async fn hide_app(&self) {}

    async fn show_msg(&self, _title: &str, _sub_title: &str, _icon_path: Option<&str>) {}
}
