//! Web search plugin implementation.

use launcher_plugin_sdk::prelude::*;
use tracing::info;

use crate::source::{QUERY_PLACEHOLDER, SearchSource};

/// Plugin ID.
pub const PLUGIN_ID: &str = "websearch";

/// Turns keyword queries into search URLs.
#[derive(Debug, Clone)]
pub struct WebSearchPlugin {
    sources: Vec<SearchSource>,
}

impl WebSearchPlugin {
    /// Creates the plugin with the given sources.
    pub fn new(sources: Vec<SearchSource>) -> Self {
        Self { sources }
    }

    /// Metadata whose trigger keywords are the sources' keywords.
    pub fn metadata(&self) -> PluginMetadata {
        plugin_metadata!(
            id: PLUGIN_ID,
            name: "Web Search",
            version: env!("CARGO_PKG_VERSION"),
            author: "Launcher Team",
            description: "Search the web from the launcher"
        )
        .with_trigger_keywords(self.sources.iter().map(|s| s.keyword.clone()))
    }
}

impl Default for WebSearchPlugin {
    fn default() -> Self {
        Self::new(SearchSource::defaults())
    }
}

#[async_trait]
impl Plugin for WebSearchPlugin {
    async fn init(&self, context: PluginInitContext) -> Result<(), PluginError> {
        if let Some(source) = self
            .sources
            .iter()
            .find(|s| !s.url_template.contains(QUERY_PLACEHOLDER))
        {
            return Err(PluginError::failed(format!(
                "search source '{}' has no {} placeholder",
                source.keyword, QUERY_PLACEHOLDER
            )));
        }

        info!(
            plugin_id = %context.metadata.id,
            sources = self.sources.len(),
            "Web search sources registered"
        );
        Ok(())
    }

    async fn query(&self, query: &Query) -> Result<Vec<QueryResult>, PluginError> {
        let Some(keyword) = query.trigger_keyword() else {
            return Ok(Vec::new());
        };

        Ok(self
            .sources
            .iter()
            .filter(|s| s.keyword == keyword)
            .map(|source| {
                let title = if query.search.is_empty() {
                    format!("Search {}", source.title)
                } else {
                    format!("Search {} for {}", source.title, query.search)
                };
                QueryResult::new(title)
                    .with_sub_title(source.url_for(&query.search))
                    .with_score(100)
                    .with_context_data(serde_json::json!({ "url": source.url_for(&query.search) }))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn context(plugin: &WebSearchPlugin) -> PluginInitContext {
        PluginInitContext::new(Arc::new(NoopPublicApi), Arc::new(plugin.metadata()))
    }

    #[tokio::test]
    async fn test_keyword_query_builds_url() {
        let plugin = WebSearchPlugin::default();
        let results = plugin
            .query(&Query::with_trigger_keyword("wiki borrow checker", "wiki"))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Search Wikipedia for borrow checker");
        assert!(results[0].sub_title.ends_with("search=borrow%20checker"));
    }

    #[tokio::test]
    async fn test_init_rejects_template_without_placeholder() {
        let plugin = WebSearchPlugin::new(vec![SearchSource::new("x", "Broken", "https://x.invalid/")]);
        let err = plugin.init(context(&plugin)).await.unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[tokio::test]
    async fn test_defaults_init_and_declare_keywords() {
        let plugin = WebSearchPlugin::default();
        plugin.init(context(&plugin)).await.unwrap();

        let metadata = plugin.metadata();
        assert!(!metadata.accepts_global_query());
        assert!(metadata.has_trigger_keyword("g"));
        assert!(metadata.has_trigger_keyword("ddg"));
    }
}
