//! Calculator plugin implementation.

use launcher_plugin_sdk::prelude::*;
use tracing::debug;

use crate::eval::{evaluate, looks_like_expression};

/// Plugin ID.
pub const PLUGIN_ID: &str = "calculator";

/// Evaluates arithmetic typed into the launcher.
#[derive(Debug, Default)]
pub struct CalculatorPlugin;

impl CalculatorPlugin {
    /// Creates the plugin.
    pub fn new() -> Self {
        Self
    }

    /// Static metadata for this plugin.
    pub fn metadata() -> PluginMetadata {
        plugin_metadata!(
            id: PLUGIN_ID,
            name: "Calculator",
            version: env!("CARGO_PKG_VERSION"),
            author: "Launcher Team",
            description: "Evaluate arithmetic expressions",
            keywords: [GLOBAL_TRIGGER_KEYWORD]
        )
    }
}

#[async_trait]
impl Plugin for CalculatorPlugin {
    async fn init(&self, _context: PluginInitContext) -> Result<(), PluginError> {
        Ok(())
    }

    async fn query(&self, query: &Query) -> Result<Vec<QueryResult>, PluginError> {
        if !looks_like_expression(&query.search) {
            return Ok(Vec::new());
        }

        match evaluate(&query.search) {
            Ok(value) => Ok(vec![
                QueryResult::new(format_value(value))
                    .with_sub_title(format!("= {}", query.search))
                    .with_score(300)
                    .with_context_data(serde_json::json!({ "value": value })),
            ]),
            Err(e) => {
                debug!(expression = %query.search, error = %e, "Not a valid expression");
                Ok(Vec::new())
            }
        }
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answers_expression() {
        let results = CalculatorPlugin::new()
            .query(&Query::new("(2 + 3) * 4"))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "20");
        assert_eq!(results[0].sub_title, "= (2 + 3) * 4");
    }

    #[tokio::test]
    async fn test_ignores_plain_text_and_bad_math() {
        let plugin = CalculatorPlugin::new();
        assert!(plugin.query(&Query::new("firefox")).await.unwrap().is_empty());
        assert!(plugin.query(&Query::new("1 / 0")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deeply_nested_input_yields_nothing() {
        let nested = format!("{}1)", "(".repeat(100_000));
        let results = CalculatorPlugin::new().query(&Query::new(nested)).await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_metadata_is_global() {
        assert!(CalculatorPlugin::metadata().accepts_global_query());
        assert_eq!(format_value(2.5), "2.5");
    }
}
