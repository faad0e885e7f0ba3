//! Query dispatcher — decides whether a plugin may answer a query and invokes it
//! behind a per-call fault boundary.
//!
//! Eligibility is evaluated in order, short-circuiting:
//! 1. a disabled plugin is never invoked;
//! 2. a plugin whose `init` has not completed is never invoked;
//! 3. a global query (no trigger keyword) reaches plugins that accept global queries;
//! 4. a keyword query reaches plugins declaring that keyword.
//!
//! A faulting plugin yields an empty result set for that query only and stays loaded.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::error::{FaultStage, PluginFault};
use crate::instance::PluginInstance;
use crate::isolation;
use crate::query::{PluginQueryResult, Query};

/// Why a plugin will or will not be invoked for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// The plugin is invoked.
    Eligible,
    /// The user disabled the plugin.
    Disabled,
    /// The plugin has not finished `init`.
    NotReady,
    /// The query's keyword shape does not match the plugin's declared keywords.
    KeywordMismatch,
}

impl Eligibility {
    /// Whether the plugin should be invoked.
    pub fn is_eligible(self) -> bool {
        self == Self::Eligible
    }
}

/// Routes one query to one plugin instance.
#[derive(Debug, Clone, Default)]
pub struct QueryDispatcher {
    timeout: Option<Duration>,
}

impl QueryDispatcher {
    /// Creates a dispatcher. `timeout` bounds each plugin's `query`; `None` is unbounded.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Evaluates the eligibility filter for `instance` and `query`.
    pub async fn eligibility(&self, instance: &PluginInstance, query: &Query) -> Eligibility {
        if instance.settings().is_disabled().await {
            return Eligibility::Disabled;
        }

        if !instance.is_ready() {
            return Eligibility::NotReady;
        }

        let metadata = instance.metadata();
        let valid_global_query = query.is_global() && metadata.accepts_global_query();
        let valid_non_global_query = query
            .trigger_keyword()
            .is_some_and(|keyword| metadata.has_trigger_keyword(keyword));

        if valid_global_query || valid_non_global_query {
            Eligibility::Eligible
        } else {
            Eligibility::KeywordMismatch
        }
    }

    /// Queries one plugin, returning the structured fault instead of swallowing it.
    ///
    /// Ineligible plugins yield `Ok` with an empty set and are not invoked.
    pub async fn try_query_for_plugin(
        &self,
        instance: &Arc<PluginInstance>,
        query: &Arc<Query>,
    ) -> Result<Vec<PluginQueryResult>, PluginFault> {
        let eligibility = self.eligibility(instance, query).await;
        if !eligibility.is_eligible() {
            debug!(
                plugin_id = %instance.id(),
                query_id = %query.id,
                ?eligibility,
                "Plugin skipped for query"
            );
            return Ok(Vec::new());
        }

        let plugin = instance.plugin().clone();
        let task_query = query.clone();
        let results = isolation::guard(async move { plugin.query(&task_query).await }, self.timeout)
            .await
            .map_err(|cause| PluginFault::new(instance, FaultStage::Query, cause))?;

        Ok(results
            .into_iter()
            .map(|result| PluginQueryResult {
                result,
                query: query.clone(),
                plugin: instance.clone(),
            })
            .collect())
    }

    /// Queries one plugin. Faults are logged and converted to an empty result set.
    pub async fn query_for_plugin(
        &self,
        instance: &Arc<PluginInstance>,
        query: &Arc<Query>,
    ) -> Vec<PluginQueryResult> {
        match self.try_query_for_plugin(instance, query).await {
            Ok(results) => results,
            Err(fault) => {
                error!(
                    plugin_id = %fault.plugin_id,
                    name = %fault.plugin_name,
                    website = %fault.website,
                    query_id = %query.id,
                    error = %fault.cause,
                    "plugin {} query ({}) failed",
                    fault.plugin_name,
                    query
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::api::context::PluginInitContext;
    use crate::error::{FaultCause, PluginError};
    use crate::metadata::{PluginMetadata, PluginSettings, SettingsHandle};
    use crate::query::QueryResult;
    use crate::traits::Plugin;

    #[derive(Debug, Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Plugin for Counting {
        async fn init(&self, _context: PluginInitContext) -> Result<(), PluginError> {
            Ok(())
        }

        async fn query(&self, query: &Query) -> Result<Vec<QueryResult>, PluginError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![QueryResult::new(query.search.clone())])
        }
    }

    fn ready_instance(
        plugin: Arc<Counting>,
        keywords: &[&str],
        disabled: bool,
    ) -> Arc<PluginInstance> {
        let instance = PluginInstance::new(
            plugin,
            PluginMetadata::new("p", "P").with_trigger_keywords(keywords.iter().copied()),
            SettingsHandle::new(PluginSettings { disabled }),
        );
        instance.mark_ready(Duration::ZERO);
        Arc::new(instance)
    }

    #[tokio::test]
    async fn test_disabled_wins_over_keyword_match() {
        let plugin = Arc::new(Counting::default());
        let instance = ready_instance(plugin.clone(), &["g"], true);
        let dispatcher = QueryDispatcher::default();
        let query = Arc::new(Query::with_trigger_keyword("g rust", "g"));

        assert_eq!(
            dispatcher.eligibility(&instance, &query).await,
            Eligibility::Disabled
        );
        assert!(dispatcher.query_for_plugin(&instance, &query).await.is_empty());
        assert_eq!(plugin.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pending_init_is_not_invoked() {
        let plugin = Arc::new(Counting::default());
        let instance = Arc::new(PluginInstance::with_default_settings(
            plugin.clone(),
            PluginMetadata::new("p", "P"),
        ));
        let dispatcher = QueryDispatcher::default();
        let query = Arc::new(Query::new("anything"));

        assert_eq!(
            dispatcher.eligibility(&instance, &query).await,
            Eligibility::NotReady
        );
        assert!(dispatcher.query_for_plugin(&instance, &query).await.is_empty());
        assert_eq!(plugin.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_settings_change_applies_to_next_query() {
        let plugin = Arc::new(Counting::default());
        let instance = ready_instance(plugin.clone(), &[], false);
        let dispatcher = QueryDispatcher::default();
        let query = Arc::new(Query::new("x"));

        assert_eq!(dispatcher.query_for_plugin(&instance, &query).await.len(), 1);
        instance.settings().set_disabled(true).await;
        assert!(dispatcher.query_for_plugin(&instance, &query).await.is_empty());
        assert_eq!(plugin.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_keyword_mismatch_both_ways() {
        let dispatcher = QueryDispatcher::default();
        let global_only = ready_instance(Arc::new(Counting::default()), &[], false);
        let keyword_only = ready_instance(Arc::new(Counting::default()), &["g"], false);

        let keyword_query = Query::with_trigger_keyword("g x", "g");
        let global_query = Query::new("x");

        assert_eq!(
            dispatcher.eligibility(&global_only, &keyword_query).await,
            Eligibility::KeywordMismatch
        );
        assert_eq!(
            dispatcher.eligibility(&keyword_only, &global_query).await,
            Eligibility::KeywordMismatch
        );
        assert_eq!(
            dispatcher.eligibility(&keyword_only, &keyword_query).await,
            Eligibility::Eligible
        );
    }

    #[derive(Debug)]
    struct Slow;

    #[async_trait]
    impl Plugin for Slow {
        async fn init(&self, _context: PluginInitContext) -> Result<(), PluginError> {
            Ok(())
        }

        async fn query(&self, _query: &Query) -> Result<Vec<QueryResult>, PluginError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![QueryResult::new("late")])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_timeout_is_a_fault() {
        let instance = PluginInstance::with_default_settings(Arc::new(Slow), PluginMetadata::new("slow", "Slow"));
        instance.mark_ready(Duration::ZERO);
        let instance = Arc::new(instance);
        let dispatcher = QueryDispatcher::new(Some(Duration::from_millis(100)));
        let query = Arc::new(Query::new("x"));

        let fault = dispatcher
            .try_query_for_plugin(&instance, &query)
            .await
            .unwrap_err();
        assert!(fault.is_timeout());
        assert_eq!(fault.stage, FaultStage::Query);
        assert!(matches!(fault.cause, FaultCause::Timeout(_)));

        assert!(dispatcher.query_for_plugin(&instance, &query).await.is_empty());
    }
}
