//! The capability contract every plugin implements.

use async_trait::async_trait;

use crate::api::context::PluginInitContext;
use crate::error::PluginError;
use crate::query::{Query, QueryResult};

/// Trait that all plugins must implement.
///
/// Both calls may run concurrently with other plugins' calls, and `query` may
/// run concurrently with itself for different queries. Errors and panics are
/// contained by the runtime and never reach the host.
#[async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// One-time setup. A failure unloads the plugin.
    async fn init(&self, context: PluginInitContext) -> Result<(), PluginError>;

    /// Answers a query. Result order is the plugin's own ranking and is preserved.
    async fn query(&self, query: &Query) -> Result<Vec<QueryResult>, PluginError>;
}
