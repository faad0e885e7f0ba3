//! Query value objects and result types.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::instance::PluginInstance;

/// A user query, immutable once constructed.
///
/// `id` and `created_at` identify the query so the UI can discard results of
/// queries superseded by a newer keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Unique query identifier.
    pub id: Uuid,
    /// Time the query was built.
    pub created_at: DateTime<Utc>,
    /// Text exactly as typed.
    pub raw_query: String,
    /// Leading trigger keyword; `None` for global queries, never empty.
    pub trigger_keyword: Option<String>,
    /// Text following the trigger keyword (the whole text for global queries), trimmed.
    pub search: String,
    /// `search` split on whitespace.
    pub terms: Vec<String>,
}

impl Query {
    /// Builds a global query (no trigger keyword).
    pub fn new(raw_query: impl Into<String>) -> Self {
        Self::parse(raw_query, |_| false)
    }

    /// Builds a query, treating the leading token as the trigger keyword when
    /// `is_trigger_keyword` accepts it.
    pub fn parse<F>(raw_query: impl Into<String>, is_trigger_keyword: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        let raw_query = raw_query.into();
        let trimmed = raw_query.trim();
        let (first, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        let (trigger_keyword, search) = if !first.is_empty() && is_trigger_keyword(first) {
            (Some(first.to_string()), rest.trim().to_string())
        } else {
            (None, trimmed.to_string())
        };

        let terms = search.split_whitespace().map(str::to_string).collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            raw_query,
            trigger_keyword,
            search,
            terms,
        }
    }

    /// Builds a query with an explicit trigger keyword. An empty keyword yields a global query.
    pub fn with_trigger_keyword(raw_query: impl Into<String>, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        if keyword.is_empty() {
            return Self::new(raw_query);
        }

        let mut query = Self::parse(raw_query, |token| token == keyword);
        query.trigger_keyword = Some(keyword);
        query
    }

    /// Returns the trigger keyword, if any.
    pub fn trigger_keyword(&self) -> Option<&str> {
        self.trigger_keyword.as_deref()
    }

    /// Whether the query carries no trigger keyword.
    pub fn is_global(&self) -> bool {
        self.trigger_keyword().is_none_or(str::is_empty)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_query)
    }
}

/// One result produced by a plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Primary line.
    pub title: String,
    /// Secondary line.
    #[serde(default)]
    pub sub_title: String,
    /// Icon path or URL.
    #[serde(default)]
    pub icon_path: Option<String>,
    /// Plugin-assigned relevance score.
    #[serde(default)]
    pub score: i64,
    /// Opaque data the plugin wants back when the result is actioned.
    #[serde(default)]
    pub context_data: Option<serde_json::Value>,
}

impl QueryResult {
    /// Creates a result with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the subtitle.
    pub fn with_sub_title(mut self, sub_title: impl Into<String>) -> Self {
        self.sub_title = sub_title.into();
        self
    }

    /// Sets the icon path.
    pub fn with_icon(mut self, icon_path: impl Into<String>) -> Self {
        self.icon_path = Some(icon_path.into());
        self
    }

    /// Sets the score.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    /// Sets the context data.
    pub fn with_context_data(mut self, data: serde_json::Value) -> Self {
        self.context_data = Some(data);
        self
    }
}

/// A plugin result tagged with the query and the instance that produced it.
#[derive(Debug, Clone)]
pub struct PluginQueryResult {
    /// The plugin's result.
    pub result: QueryResult,
    /// The query that produced it.
    pub query: Arc<Query>,
    /// The instance that produced it.
    pub plugin: Arc<PluginInstance>,
}

impl PluginQueryResult {
    /// ID of the producing plugin.
    pub fn plugin_id(&self) -> &str {
        &self.plugin.metadata().id
    }
}
