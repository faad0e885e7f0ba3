//! Plugin runtime configuration.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Plugin runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Upper bound for a single plugin `init` call, in milliseconds (0 = unbounded).
    #[serde(default = "default_init_timeout")]
    pub init_timeout_ms: u64,
    /// Upper bound for a single plugin `query` call, in milliseconds (0 = unbounded).
    #[serde(default = "default_query_timeout")]
    pub query_timeout_ms: u64,
    /// Persisted per-plugin settings, keyed by plugin ID.
    #[serde(default)]
    pub settings: HashMap<String, PluginSettingsOverride>,
}

/// User-controlled settings persisted for one plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSettingsOverride {
    /// Whether the user disabled the plugin.
    #[serde(default)]
    pub disabled: bool,
}

impl PluginConfig {
    /// Returns the init timeout, or `None` when unbounded.
    pub fn init_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.init_timeout_ms)
    }

    /// Returns the query timeout, or `None` when unbounded.
    pub fn query_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.query_timeout_ms)
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            init_timeout_ms: default_init_timeout(),
            query_timeout_ms: default_query_timeout(),
            settings: HashMap::new(),
        }
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn default_init_timeout() -> u64 {
    30_000
}

fn default_query_timeout() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_disables_timeouts() {
        let config = PluginConfig {
            init_timeout_ms: 0,
            query_timeout_ms: 250,
            settings: HashMap::new(),
        };
        assert_eq!(config.init_timeout(), None);
        assert_eq!(config.query_timeout(), Some(Duration::from_millis(250)));
    }
}
