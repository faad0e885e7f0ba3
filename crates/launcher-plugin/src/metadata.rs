//! Static plugin metadata and user-controlled plugin settings.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use launcher_core::config::plugin::PluginSettingsOverride;

/// Trigger keyword sentinel meaning "answers queries that carry no keyword".
pub const GLOBAL_TRIGGER_KEYWORD: &str = "*";

/// Immutable description of a plugin, declared by its package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    #[serde(default)]
    pub version: String,
    /// Author or maintainer.
    #[serde(default)]
    pub author: String,
    /// Website or contact address.
    #[serde(default)]
    pub website: String,
    /// Plugin description.
    #[serde(default)]
    pub description: String,
    /// Keywords that route a query to this plugin, in declaration order.
    ///
    /// An empty list, or one containing [`GLOBAL_TRIGGER_KEYWORD`], makes the
    /// plugin answer global queries.
    #[serde(default)]
    pub trigger_keywords: Vec<String>,
}

impl PluginMetadata {
    /// Creates metadata with the given identity and no trigger keywords.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: String::new(),
            author: String::new(),
            website: String::new(),
            description: String::new(),
            trigger_keywords: Vec::new(),
        }
    }

    /// Sets the trigger keywords.
    pub fn with_trigger_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trigger_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Sets the website.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this plugin answers queries without a trigger keyword.
    pub fn accepts_global_query(&self) -> bool {
        self.trigger_keywords.is_empty()
            || self
                .trigger_keywords
                .iter()
                .any(|k| k == GLOBAL_TRIGGER_KEYWORD)
    }

    /// Whether `keyword` is one of this plugin's non-global trigger keywords.
    pub fn has_trigger_keyword(&self, keyword: &str) -> bool {
        !keyword.is_empty()
            && keyword != GLOBAL_TRIGGER_KEYWORD
            && self.trigger_keywords.iter().any(|k| k == keyword)
    }

    /// Iterates the declared keywords, excluding the global sentinel.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.trigger_keywords
            .iter()
            .map(String::as_str)
            .filter(|k| !k.is_empty() && *k != GLOBAL_TRIGGER_KEYWORD)
    }
}

/// Mutable, user-controlled configuration scoped to one plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettings {
    /// Whether the user disabled the plugin.
    #[serde(default)]
    pub disabled: bool,
}

impl From<&PluginSettingsOverride> for PluginSettings {
    fn from(value: &PluginSettingsOverride) -> Self {
        Self {
            disabled: value.disabled,
        }
    }
}

/// Shared handle to a plugin's settings.
///
/// The settings surface writes through it; the dispatcher reads it on every query.
#[derive(Debug, Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<RwLock<PluginSettings>>,
}

impl SettingsHandle {
    /// Wraps the given settings.
    pub fn new(settings: PluginSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Whether the plugin is currently disabled.
    pub async fn is_disabled(&self) -> bool {
        self.inner.read().await.disabled
    }

    /// Enables or disables the plugin.
    pub async fn set_disabled(&self, disabled: bool) {
        self.inner.write().await.disabled = disabled;
    }
}
