//! Convenience macros for plugin development.

/// Builds a [`PluginMetadata`](launcher_plugin::PluginMetadata).
///
/// ```rust,ignore
/// let metadata = plugin_metadata!(
///     id: "websearch",
///     name: "Web Search",
///     version: "1.0.0",
///     keywords: ["g", "wiki"]
/// );
/// ```
#[macro_export]
macro_rules! plugin_metadata {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr
        $(, author: $author:expr)?
        $(, website: $website:expr)?
        $(, description: $desc:expr)?
        $(, keywords: [$($keyword:expr),* $(,)?])?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut metadata = $crate::prelude::PluginMetadata::new($id, $name).with_version($version);
        $( metadata = metadata.with_author($author); )?
        $( metadata = metadata.with_website($website); )?
        $( metadata = metadata.with_description($desc); )?
        $( metadata = metadata.with_trigger_keywords([$($keyword),*]); )?
        metadata
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_minimal_metadata_is_global() {
        let metadata = plugin_metadata!(id: "echo", name: "Echo", version: "0.1.0");
        assert_eq!(metadata.id, "echo");
        assert_eq!(metadata.version, "0.1.0");
        assert!(metadata.accepts_global_query());
    }

    #[test]
    fn test_full_metadata() {
        let metadata = plugin_metadata!(
            id: "websearch",
            name: "Web Search",
            version: "1.0.0",
            author: "Launcher Team",
            website: "https://example.invalid",
            description: "Search the web",
            keywords: ["g", "wiki"],
        );
        assert_eq!(metadata.trigger_keywords, vec!["g".to_string(), "wiki".to_string()]);
        assert_eq!(metadata.author, "Launcher Team");
        assert!(!metadata.accepts_global_query());
    }
}
