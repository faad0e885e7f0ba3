//! Plugin manager — wires loader, registry, initializer, and dispatcher together.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info};

use launcher_core::AppResult;
use launcher_core::config::plugin::PluginConfig;

use crate::api::context::PublicApi;
use crate::dispatcher::QueryDispatcher;
use crate::initializer::{InitReport, PluginInitializer};
use crate::instance::PluginInstance;
use crate::loader::PluginLoader;
use crate::query::{PluginQueryResult, Query, QueryResult};
use crate::registry::PluginRegistry;
use crate::unload::{UnloadPolicy, UnloadRecord};

/// Aggregated results of one query across all plugins.
#[derive(Debug, Clone)]
pub struct QueryResponse {
    /// The query as dispatched.
    pub query: Arc<Query>,
    /// Results in registry order, each plugin's own order preserved.
    pub results: Vec<PluginQueryResult>,
}

/// Flattened result row for display and serialization.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    /// Producing plugin ID.
    pub plugin_id: String,
    /// Producing plugin name.
    pub plugin_name: String,
    /// The plugin's result.
    #[serde(flatten)]
    pub result: QueryResult,
}

impl QueryResponse {
    /// Flattens results into serializable rows.
    pub fn rows(&self) -> Vec<ResultRow> {
        self.results
            .iter()
            .map(|r| ResultRow {
                plugin_id: r.plugin.metadata().id.clone(),
                plugin_name: r.plugin.metadata().name.clone(),
                result: r.result.clone(),
            })
            .collect()
    }

    /// Whether no plugin produced a result.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Manages the full plugin lifecycle: load, init, query, unload.
#[derive(Debug, Clone)]
pub struct PluginManager {
    registry: Arc<PluginRegistry>,
    unload: UnloadPolicy,
    initializer: PluginInitializer,
    dispatcher: QueryDispatcher,
}

impl PluginManager {
    /// Creates a manager with a fresh registry.
    pub fn new(config: &PluginConfig) -> Self {
        Self::with_registry(Arc::new(PluginRegistry::new()), config)
    }

    /// Creates a manager over an existing registry.
    pub fn with_registry(registry: Arc<PluginRegistry>, config: &PluginConfig) -> Self {
        let unload = UnloadPolicy::new(registry.clone());
        Self {
            initializer: PluginInitializer::new(unload.clone(), config.init_timeout()),
            dispatcher: QueryDispatcher::new(config.query_timeout()),
            registry,
            unload,
        }
    }

    /// Loads plugins from `loader`, replacing the registry, then initializes them.
    ///
    /// Only the loader can fail; plugin init faults are reported in the [`InitReport`].
    pub async fn load_plugins(
        &self,
        loader: &dyn PluginLoader,
        api: Arc<dyn PublicApi>,
    ) -> AppResult<InitReport> {
        let instances = loader.load().await?;
        self.registry.load(instances).await;

        let report = self.initializer.init_all(api).await;

        info!(
            loaded = report.initialized.len(),
            failed = report.failed.len(),
            "Plugins ready"
        );

        Ok(report)
    }

    /// Parses raw text into a query.
    ///
    /// The leading token becomes the trigger keyword only if a registered
    /// plugin declares it; otherwise the whole text is a global query.
    pub async fn build_query(&self, raw_query: &str) -> Query {
        let keywords = self.registry.trigger_keywords().await;
        Query::parse(raw_query, |token| keywords.contains(token))
    }

    /// Parses and dispatches `raw_query` to every registered plugin.
    pub async fn query(&self, raw_query: &str) -> QueryResponse {
        let query = self.build_query(raw_query).await;
        self.query_with(query).await
    }

    /// Dispatches an already-built query to every registered plugin concurrently.
    pub async fn query_with(&self, query: Query) -> QueryResponse {
        let query = Arc::new(query);
        let instances = self.registry.all().await;

        debug!(
            query_id = %query.id,
            keyword = ?query.trigger_keyword(),
            plugins = instances.len(),
            "Dispatching query"
        );

        let per_plugin = join_all(
            instances
                .iter()
                .map(|instance| self.dispatcher.query_for_plugin(instance, &query)),
        )
        .await;

        QueryResponse {
            results: per_plugin.into_iter().flatten().collect(),
            query,
        }
    }

    /// Unloads a plugin by ID. Returns `false` if it is not registered.
    pub async fn unload_plugin(&self, plugin_id: &str, reason: &str) -> bool {
        match self.registry.get(plugin_id).await {
            Some(instance) => self.unload.unload(&instance, reason).await,
            None => false,
        }
    }

    /// Snapshot of every registered plugin.
    pub async fn plugins(&self) -> Vec<Arc<PluginInstance>> {
        self.registry.all().await
    }

    /// Every unload recorded so far.
    pub async fn unload_journal(&self) -> Vec<UnloadRecord> {
        self.unload.journal().await
    }

    /// Returns the plugin registry.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Returns the query dispatcher.
    pub fn dispatcher(&self) -> &QueryDispatcher {
        &self.dispatcher
    }

    /// Returns the unload policy.
    pub fn unload_policy(&self) -> &UnloadPolicy {
        &self.unload
    }
}
