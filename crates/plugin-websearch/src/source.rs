//! Search source definitions.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the URL-encoded search text.
pub const QUERY_PLACEHOLDER: &str = "{q}";

/// One search engine reachable through a trigger keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSource {
    /// Trigger keyword.
    pub keyword: String,
    /// Display title.
    pub title: String,
    /// URL template containing [`QUERY_PLACEHOLDER`].
    pub url_template: String,
}

impl SearchSource {
    /// Creates a search source.
    pub fn new(
        keyword: impl Into<String>,
        title: impl Into<String>,
        url_template: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            title: title.into(),
            url_template: url_template.into(),
        }
    }

    /// Builds the search URL for `search`.
    pub fn url_for(&self, search: &str) -> String {
        self.url_template
            .replace(QUERY_PLACEHOLDER, &urlencoding::encode(search))
    }

    /// The sources shipped with the launcher.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("g", "Google", "https://www.google.com/search?q={q}"),
            Self::new("wiki", "Wikipedia", "https://en.wikipedia.org/wiki/Special:Search?search={q}"),
            Self::new("ddg", "DuckDuckGo", "https://duckduckgo.com/?q={q}"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_encoded() {
        let source = SearchSource::new("g", "Google", "https://www.google.com/search?q={q}");
        assert_eq!(
            source.url_for("rust & traits"),
            "https://www.google.com/search?q=rust%20%26%20traits"
        );
    }
}
